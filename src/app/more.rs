//! "More" screen: a carousel plus one section per featured platform.
//!
//! One request covers every platform in
//! [`FilterPlatform::available_in_more`]; the response is then split
//! locally.

use crate::app::detail::DetailViewModel;
use crate::app::pagination;
use crate::app::runtime::{self, Response, Screen};
use crate::app::Action;
use crate::catalog::CatalogClient;
use crate::domain::giveaway::MULTI_VALUE_SEPARATOR;
use crate::domain::{ApiError, ApiResult, FilterPlatform, GiveawayFilter, GiveawayItem};
use crate::storage::FavoritesStore;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MoreState {
    pub is_loading: bool,
    pub error: Option<ApiError>,
    /// Index of the carousel page shown.
    pub selected_page_index: usize,
    pub carousel_items: Vec<GiveawayItem>,
    /// Items per platform display name. Every featured platform has a key.
    pub sections: BTreeMap<String, Vec<GiveawayItem>>,
    pub selected_detail: Option<DetailViewModel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoreEvent {
    Load,
    GiveawaysResponse {
        request_id: u64,
        result: ApiResult<Option<Vec<GiveawayItem>>>,
    },
    SelectItem(GiveawayItem),
    ToggleFavorite(GiveawayItem),
    SelectPage(usize),
    CloseDetail,
}

#[derive(Debug)]
pub struct MoreViewModel {
    pub state: MoreState,
    favorites: Arc<FavoritesStore>,
    carousel_size: usize,
    next_request_id: u64,
    latest_request_id: Option<u64>,
}

impl MoreViewModel {
    #[must_use]
    pub fn new(favorites: Arc<FavoritesStore>, carousel_size: usize) -> Self {
        Self {
            state: MoreState::default(),
            favorites,
            carousel_size,
            next_request_id: 0,
            latest_request_id: None,
        }
    }

    /// Filter covering every featured platform, e.g. `epic-games-store.gog...`.
    #[must_use]
    pub fn featured_filter() -> GiveawayFilter {
        let platforms: Vec<&str> = FilterPlatform::available_in_more()
            .iter()
            .map(|p| p.value())
            .collect();
        GiveawayFilter::platform(platforms.join(MULTI_VALUE_SEPARATOR))
    }

    pub fn load(&mut self) -> Vec<Action> {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.latest_request_id = Some(request_id);
        self.state.is_loading = true;

        vec![Action::FetchGiveaways {
            request_id,
            filter: Some(Self::featured_filter()),
        }]
    }

    pub fn apply_giveaways_response(
        &mut self,
        request_id: u64,
        result: ApiResult<Option<Vec<GiveawayItem>>>,
    ) -> bool {
        if self.latest_request_id != Some(request_id) {
            tracing::debug!(request_id, "discarding stale response");
            return false;
        }
        self.state.is_loading = false;

        match result {
            Ok(Some(items)) if !items.is_empty() => {
                let items = self.favorites.merge_favorites(items);
                self.state.carousel_items = items.iter().take(self.carousel_size).cloned().collect();
                self.state.sections = FilterPlatform::available_in_more()
                    .iter()
                    .map(|platform| {
                        let matching = items
                            .iter()
                            .filter(|item| item.is_on_platform(platform.name()))
                            .cloned()
                            .collect();
                        (platform.name().to_string(), matching)
                    })
                    .collect();
                self.state.selected_page_index = 0;
                self.state.error = None;

                tracing::debug!(
                    total = items.len(),
                    carousel = self.state.carousel_items.len(),
                    "sections built"
                );
            }
            Ok(_) => self.state.error = Some(ApiError::NoData),
            Err(error) => self.state.error = Some(error),
        }
        true
    }

    /// Flips the favorite flag of `item` in the carousel and every section,
    /// and records it in the store.
    pub fn toggle_favorite(&mut self, item: &GiveawayItem) {
        let mut toggled = item.clone();
        toggled.is_favorite = !item.is_favorite;

        pagination::replace_by_id(&mut self.state.carousel_items, &toggled);
        for items in self.state.sections.values_mut() {
            pagination::replace_by_id(items, &toggled);
        }
        self.favorites.apply_toggle(&toggled);
    }

    pub fn select_item(&mut self, item: &GiveawayItem) -> Vec<Action> {
        self.state.selected_detail = Some(DetailViewModel::new(
            item.id,
            item.is_favorite,
            Arc::clone(&self.favorites),
        ));
        vec![Action::OpenDetail {
            item_id: item.id,
            is_favorite: item.is_favorite,
        }]
    }

    pub fn close_detail(&mut self) {
        self.state.selected_detail = None;
    }

    /// Fetches and applies the sections through `client`.
    pub async fn load_with<C: CatalogClient>(&mut self, client: &C) -> Vec<Action> {
        runtime::dispatch(self, client, MoreEvent::Load).await
    }

    pub fn handle_event(&mut self, event: MoreEvent) -> (bool, Vec<Action>) {
        let _span = tracing::debug_span!("more_event").entered();

        match event {
            MoreEvent::Load => (true, self.load()),
            MoreEvent::GiveawaysResponse { request_id, result } => {
                (self.apply_giveaways_response(request_id, result), vec![])
            }
            MoreEvent::SelectItem(item) => (true, self.select_item(&item)),
            MoreEvent::ToggleFavorite(item) => {
                self.toggle_favorite(&item);
                (true, vec![])
            }
            MoreEvent::SelectPage(index) => {
                let changed = self.state.selected_page_index != index;
                self.state.selected_page_index = index;
                (changed, vec![])
            }
            MoreEvent::CloseDetail => {
                self.close_detail();
                (true, vec![])
            }
        }
    }
}

impl Screen for MoreViewModel {
    type Event = MoreEvent;

    fn handle_event(&mut self, event: MoreEvent) -> (bool, Vec<Action>) {
        Self::handle_event(self, event)
    }

    fn response_event(response: Response) -> Option<MoreEvent> {
        match response {
            Response::Giveaways { request_id, result } => {
                Some(MoreEvent::GiveawaysResponse { request_id, result })
            }
            Response::Detail { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> Arc<FavoritesStore> {
        Arc::new(FavoritesStore::new(Box::new(MemoryStore::default())))
    }

    fn on(id: i64, platforms: &str) -> GiveawayItem {
        let mut item = GiveawayItem::mock(id);
        item.platforms = Some(platforms.to_string());
        item
    }

    fn loaded(items: Vec<GiveawayItem>, favorites: Arc<FavoritesStore>) -> MoreViewModel {
        let mut more = MoreViewModel::new(favorites, 5);
        more.load();
        assert!(more.apply_giveaways_response(1, Ok(Some(items))));
        more
    }

    #[test]
    fn load_requests_every_featured_platform() {
        let mut more = MoreViewModel::new(store(), 5);
        let actions = more.load();
        assert!(more.state.is_loading);
        assert_eq!(
            actions,
            vec![Action::FetchGiveaways {
                request_id: 1,
                filter: Some(GiveawayFilter::platform(
                    "epic-games-store.gog.ubisoft.ps5.xbox-series-xs.switch"
                )),
            }]
        );
    }

    #[test]
    fn carousel_takes_first_five() {
        let more = loaded(GiveawayItem::mock_list(8), store());
        let ids: Vec<i64> = more.state.carousel_items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sections_group_by_platform_name() {
        let more = loaded(
            vec![
                on(1, "PC, Epic Games Store"),
                on(2, "GOG"),
                on(3, "Epic Games Store, GOG"),
                on(4, "Steam"),
            ],
            store(),
        );

        assert_eq!(more.state.sections.len(), 6);
        let ids = |name: &str| -> Vec<i64> {
            more.state.sections[name].iter().map(|i| i.id).collect()
        };
        assert_eq!(ids("Epic Games Store"), vec![1, 3]);
        assert_eq!(ids("GOG"), vec![2, 3]);
        assert!(ids("Switch").is_empty());
    }

    #[test]
    fn empty_payload_is_no_data() {
        let mut more = MoreViewModel::new(store(), 5);
        more.load();
        more.apply_giveaways_response(1, Ok(Some(vec![])));
        assert_eq!(more.state.error, Some(ApiError::NoData));
        assert!(!more.state.is_loading);
    }

    #[test]
    fn toggle_updates_sections_carousel_and_store() {
        let favorites = store();
        let mut more = loaded(
            vec![on(1, "Epic Games Store, GOG"), on(2, "GOG")],
            Arc::clone(&favorites),
        );

        let item = more.state.carousel_items[0].clone();
        more.handle_event(MoreEvent::ToggleFavorite(item));

        assert!(more.state.carousel_items[0].is_favorite);
        assert!(more.state.sections["Epic Games Store"][0].is_favorite);
        assert!(more.state.sections["GOG"][0].is_favorite);
        assert!(!more.state.sections["GOG"][1].is_favorite);
        assert!(favorites.contains(1));
    }

    #[test]
    fn select_and_close_detail() {
        let mut more = loaded(GiveawayItem::mock_list(1), store());
        let item = more.state.carousel_items[0].clone();
        let (_, actions) = more.handle_event(MoreEvent::SelectItem(item));
        assert_eq!(
            actions,
            vec![Action::OpenDetail {
                item_id: 1,
                is_favorite: false
            }]
        );
        assert!(more.state.selected_detail.is_some());

        more.handle_event(MoreEvent::CloseDetail);
        assert!(more.state.selected_detail.is_none());
    }
}
