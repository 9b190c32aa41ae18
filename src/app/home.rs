//! Home list state: pagination, search and favorites over one catalog fetch.
//!
//! A first-page load fetches the whole catalog once and splits it into
//! fixed-size pages. Further pages are revealed locally without another
//! request. Search is an independent view over every fetched item, and
//! favorite toggles patch items in place without re-fetching.
//!
//! # State Components
//!
//! - **Pages**: chunks of the most recent successful fetch
//! - **Visible items**: pages `0..=current_page_index`, unique by id
//! - **Filtered items**: title matches for the current search text
//! - **Error**: the single user-visible failure, if any
//!
//! # Example
//!
//! ```
//! use giveaway::app::{Action, HomeViewModel};
//! use giveaway::storage::{FavoritesStore, MemoryStore};
//! use giveaway::GiveawayItem;
//! use std::sync::Arc;
//!
//! let favorites = Arc::new(FavoritesStore::new(Box::new(MemoryStore::default())));
//! let mut home = HomeViewModel::new(favorites, 10);
//!
//! let actions = home.load_first_page(None);
//! let Action::FetchGiveaways { request_id, .. } = actions[0] else { unreachable!() };
//!
//! home.apply_giveaways_response(request_id, Ok(Some(GiveawayItem::mock_list(25))));
//! assert_eq!(home.state.visible_items.len(), 10);
//! assert!(home.state.has_more_pages);
//! ```

use crate::app::detail::DetailViewModel;
use crate::app::pagination;
use crate::app::runtime::{self, Response, Screen};
use crate::app::Action;
use crate::catalog::CatalogClient;
use crate::domain::{ApiError, ApiResult, GiveawayFilter, GiveawayItem};
use crate::storage::FavoritesStore;
use std::sync::Arc;

/// Snapshot of the home list.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    /// Chunks of the most recent successful fetch.
    ///
    /// Replaced only by a fresh fetch.
    pub pages: Vec<Vec<GiveawayItem>>,

    /// Index of the last revealed page. Reset to 0 on every fresh fetch.
    pub current_page_index: usize,

    /// Revealed items in insertion order, unique by id.
    pub visible_items: Vec<GiveawayItem>,

    /// Whether some fetched items are not yet visible.
    pub has_more_pages: bool,

    pub search_text: String,

    /// Title matches for `search_text` across all pages.
    pub filtered_items: Vec<GiveawayItem>,

    pub is_loading: bool,

    /// The one failure currently shown, replacing any previous one.
    pub error: Option<ApiError>,

    /// Machine value of the active quick-filter chip, empty when none.
    pub quick_filter: String,

    /// Filter of the most recent first-page load.
    pub filter: Option<GiveawayFilter>,

    /// Detail screen opened from this list.
    pub selected_detail: Option<DetailViewModel>,
}

/// Which page a load request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    First,
    Next,
}

/// Events accepted by [`HomeViewModel::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeEvent {
    LoadGiveaways {
        filter: Option<GiveawayFilter>,
        page: Page,
    },
    GiveawaysResponse {
        request_id: u64,
        result: ApiResult<Option<Vec<GiveawayItem>>>,
    },
    SelectItem(GiveawayItem),
    ToggleFavorite(GiveawayItem),
    SearchChanged(String),
    QuickFilter(String),
    CloseDetail,
}

/// State manager of the home list.
#[derive(Debug)]
pub struct HomeViewModel {
    pub state: HomeState,
    favorites: Arc<FavoritesStore>,
    page_size: usize,
    next_request_id: u64,
    latest_request_id: Option<u64>,
}

impl HomeViewModel {
    /// Creates an empty list that pages fetched results by `page_size`.
    #[must_use]
    pub fn new(favorites: Arc<FavoritesStore>, page_size: usize) -> Self {
        Self {
            state: HomeState::default(),
            favorites,
            page_size: page_size.max(1),
            next_request_id: 0,
            latest_request_id: None,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Items presentation should show: search matches while searching,
    /// revealed pages otherwise.
    #[must_use]
    pub fn displayed_items(&self) -> &[GiveawayItem] {
        if self.state.search_text.is_empty() {
            &self.state.visible_items
        } else {
            &self.state.filtered_items
        }
    }

    /// Starts a fresh fetch.
    ///
    /// Loading without a filter clears the quick-filter label. Only the
    /// response to the most recent call is applied.
    pub fn load_first_page(&mut self, filter: Option<GiveawayFilter>) -> Vec<Action> {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.latest_request_id = Some(request_id);

        self.state.is_loading = true;
        if filter.is_none() {
            self.state.quick_filter.clear();
        }
        self.state.filter.clone_from(&filter);

        tracing::debug!(request_id, filter = ?filter, "loading first page");
        vec![Action::FetchGiveaways { request_id, filter }]
    }

    /// Applies the outcome of a first-page fetch.
    ///
    /// Returns `false` when the response is stale and was discarded.
    pub fn apply_giveaways_response(
        &mut self,
        request_id: u64,
        result: ApiResult<Option<Vec<GiveawayItem>>>,
    ) -> bool {
        if self.latest_request_id != Some(request_id) {
            tracing::debug!(
                request_id,
                latest = ?self.latest_request_id,
                "discarding stale response"
            );
            return false;
        }
        self.state.is_loading = false;

        match result {
            Ok(Some(items)) if !items.is_empty() => {
                let merged = self.favorites.merge_favorites(items);
                self.state.pages = pagination::chunk(merged, self.page_size);
                self.state.current_page_index = 0;
                self.state.visible_items.clear();
                if let Some(first) = self.state.pages.first() {
                    pagination::append_unique(&mut self.state.visible_items, first);
                }
                self.recompute_has_more();
                self.state.error = None;

                tracing::debug!(
                    total = pagination::total_len(&self.state.pages),
                    pages = self.state.pages.len(),
                    "catalog paged"
                );

                if !self.state.search_text.is_empty() {
                    let text = self.state.search_text.clone();
                    self.set_search_text(text);
                }
            }
            Ok(_) => {
                self.state.pages.clear();
                self.state.visible_items.clear();
                self.state.current_page_index = 0;
                self.state.has_more_pages = false;
                self.state.error = Some(if self.state.search_text.is_empty() {
                    ApiError::NoData
                } else {
                    ApiError::SearchError
                });
            }
            Err(error) => {
                tracing::debug!(error = %error, "catalog fetch failed");
                self.state.error = Some(error);
            }
        }
        true
    }

    /// Reveals the next page. No-op when every fetched item is visible.
    pub fn load_next_page(&mut self) -> bool {
        if !self.state.has_more_pages {
            return false;
        }

        let next = self.state.current_page_index + 1;
        let Some(page) = self.state.pages.get(next) else {
            self.state.has_more_pages = false;
            return true;
        };

        self.state.current_page_index = next;
        let appended = pagination::append_unique(&mut self.state.visible_items, page);
        self.recompute_has_more();

        tracing::debug!(page = next, appended, has_more = self.state.has_more_pages, "next page");
        true
    }

    /// Updates the search view. Pagination is never touched.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();

        if self.state.search_text.is_empty() {
            self.state.filtered_items.clear();
            if self.state.error == Some(ApiError::SearchError) {
                self.state.error = None;
            }
            return;
        }

        let query = self.state.search_text.as_str();
        self.state.filtered_items = self
            .state
            .pages
            .iter()
            .flatten()
            .filter(|item| item.title_contains(query))
            .cloned()
            .collect();

        if self.state.filtered_items.is_empty() {
            self.state.error = Some(ApiError::SearchError);
        } else if self.state.error == Some(ApiError::SearchError) {
            self.state.error = None;
        }

        tracing::trace!(
            query = %self.state.search_text,
            matches = self.state.filtered_items.len(),
            "search applied"
        );
    }

    /// Flips the favorite flag of `item` everywhere it appears and records
    /// the outcome in the favorites store.
    ///
    /// Items missing from the visible list are appended to it, which may
    /// leave nothing left to reveal. Order and chunking are preserved.
    pub fn toggle_favorite(&mut self, item: &GiveawayItem) {
        let mut toggled = item.clone();
        toggled.is_favorite = !item.is_favorite;

        if !pagination::replace_by_id(&mut self.state.visible_items, &toggled) {
            self.state.visible_items.push(toggled.clone());
            self.recompute_has_more();
        }
        for page in &mut self.state.pages {
            pagination::replace_by_id(page, &toggled);
        }
        pagination::replace_by_id(&mut self.state.filtered_items, &toggled);

        tracing::debug!(item_id = toggled.id, is_favorite = toggled.is_favorite, "favorite toggled");
        self.favorites.apply_toggle(&toggled);
    }

    /// Loads the first page constrained to one platform.
    pub fn set_quick_filter(&mut self, platform_value: impl Into<String>) -> Vec<Action> {
        let platform_value = platform_value.into();
        let filter = GiveawayFilter::platform(platform_value.clone());
        self.state.quick_filter = platform_value;
        self.load_first_page(Some(filter))
    }

    /// Opens the detail screen for `item`.
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

    /// Fetches and applies the first page through `client`.
    pub async fn load_first_page_with<C: CatalogClient>(
        &mut self,
        client: &C,
        filter: Option<GiveawayFilter>,
    ) -> Vec<Action> {
        runtime::dispatch(
            self,
            client,
            HomeEvent::LoadGiveaways {
                filter,
                page: Page::First,
            },
        )
        .await
    }

    pub fn handle_event(&mut self, event: HomeEvent) -> (bool, Vec<Action>) {
        let _span = tracing::debug_span!("home_event", event_type = home_event_name(&event)).entered();

        match event {
            HomeEvent::LoadGiveaways {
                filter,
                page: Page::First,
            } => (true, self.load_first_page(filter)),
            HomeEvent::LoadGiveaways {
                page: Page::Next, ..
            } => (self.load_next_page(), vec![]),
            HomeEvent::GiveawaysResponse { request_id, result } => {
                (self.apply_giveaways_response(request_id, result), vec![])
            }
            HomeEvent::SelectItem(item) => (true, self.select_item(&item)),
            HomeEvent::ToggleFavorite(item) => {
                self.toggle_favorite(&item);
                (true, vec![])
            }
            HomeEvent::SearchChanged(text) => {
                self.set_search_text(text);
                (true, vec![])
            }
            HomeEvent::QuickFilter(platform) => (true, self.set_quick_filter(platform)),
            HomeEvent::CloseDetail => {
                self.close_detail();
                (true, vec![])
            }
        }
    }

    fn recompute_has_more(&mut self) {
        self.state.has_more_pages =
            self.state.visible_items.len() < pagination::total_len(&self.state.pages);
    }
}

impl Screen for HomeViewModel {
    type Event = HomeEvent;

    fn handle_event(&mut self, event: HomeEvent) -> (bool, Vec<Action>) {
        Self::handle_event(self, event)
    }

    fn response_event(response: Response) -> Option<HomeEvent> {
        match response {
            Response::Giveaways { request_id, result } => {
                Some(HomeEvent::GiveawaysResponse { request_id, result })
            }
            Response::Detail { .. } => None,
        }
    }
}

const fn home_event_name(event: &HomeEvent) -> &'static str {
    match event {
        HomeEvent::LoadGiveaways { .. } => "load_giveaways",
        HomeEvent::GiveawaysResponse { .. } => "giveaways_response",
        HomeEvent::SelectItem(_) => "select_item",
        HomeEvent::ToggleFavorite(_) => "toggle_favorite",
        HomeEvent::SearchChanged(_) => "search_changed",
        HomeEvent::QuickFilter(_) => "quick_filter",
        HomeEvent::CloseDetail => "close_detail",
    }
}
