//! Screen flows driven through the runtime with an in-process catalog.

use giveaway::app::{dispatch, Action, DetailEvent, HomeEvent, MoreEvent, Page};
use giveaway::catalog::CatalogClient;
use giveaway::storage::{FavoritesStore, JsonFileStore, MemoryStore};
use giveaway::{
    ApiError, ApiResult, GiveawayFilter, GiveawayItem, HomeViewModel, MoreViewModel,
};
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Catalog answering from a fixed list and recording every filter it sees.
#[derive(Default)]
struct FakeCatalog {
    items: Vec<GiveawayItem>,
    failure: Option<ApiError>,
    filters: Mutex<Vec<Option<GiveawayFilter>>>,
}

impl FakeCatalog {
    fn with_items(items: Vec<GiveawayItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.filters.lock().unwrap().len()
    }
}

impl CatalogClient for FakeCatalog {
    fn giveaways(
        &self,
        filter: Option<&GiveawayFilter>,
    ) -> impl Future<Output = ApiResult<Option<Vec<GiveawayItem>>>> + Send {
        self.filters.lock().unwrap().push(filter.cloned());
        let result = match self.failure {
            Some(error) => Err(error),
            None => Ok(Some(self.items.clone())),
        };
        async move { result }
    }

    fn giveaway_detail(
        &self,
        id: i64,
    ) -> impl Future<Output = ApiResult<Option<GiveawayItem>>> + Send {
        let result = match self.failure {
            Some(error) => Err(error),
            None => Ok(self.items.iter().find(|item| item.id == id).cloned()),
        };
        async move { result }
    }
}

fn memory_favorites() -> Arc<FavoritesStore> {
    Arc::new(FavoritesStore::new(Box::new(MemoryStore::default())))
}

fn file_favorites(path: &Path) -> Arc<FavoritesStore> {
    let backend = JsonFileStore::new(path.to_path_buf()).unwrap();
    Arc::new(FavoritesStore::new(Box::new(backend)))
}

fn item(id: i64, title: &str, platforms: &str) -> GiveawayItem {
    let mut item = GiveawayItem::mock(id);
    item.title = Some(title.to_string());
    item.platforms = Some(platforms.to_string());
    item
}

fn ids(items: &[GiveawayItem]) -> Vec<i64> {
    items.iter().map(|item| item.id).collect()
}

#[tokio::test]
async fn pages_through_one_fetch() {
    let catalog = FakeCatalog::with_items(GiveawayItem::mock_list(25));
    let mut home = HomeViewModel::new(memory_favorites(), 10);

    home.load_first_page_with(&catalog, None).await;
    assert_eq!(home.state.visible_items.len(), 10);
    assert!(home.state.has_more_pages);
    assert!(!home.state.is_loading);

    for _ in 0..2 {
        dispatch(
            &mut home,
            &catalog,
            HomeEvent::LoadGiveaways {
                filter: None,
                page: Page::Next,
            },
        )
        .await;
    }

    assert_eq!(ids(&home.state.visible_items), (1..=25).collect::<Vec<_>>());
    assert!(!home.state.has_more_pages);
    assert!(!home.load_next_page());
    assert_eq!(catalog.calls(), 1);
}

#[tokio::test]
async fn quick_filter_refetches_with_platform() {
    let catalog = FakeCatalog::with_items(GiveawayItem::mock_list(3));
    let mut home = HomeViewModel::new(memory_favorites(), 10);

    dispatch(&mut home, &catalog, HomeEvent::QuickFilter("steam".to_string())).await;
    assert_eq!(home.state.quick_filter, "steam");

    home.load_first_page_with(&catalog, None).await;
    assert!(home.state.quick_filter.is_empty());

    let filters = catalog.filters.lock().unwrap();
    assert_eq!(
        filters.as_slice(),
        &[Some(GiveawayFilter::platform("steam")), None]
    );
}

#[tokio::test]
async fn search_survives_a_refetch() {
    let catalog = FakeCatalog::with_items(vec![
        item(1, "Alpha", "PC"),
        item(2, "Beta", "PC"),
        item(3, "Gamma", "PC"),
    ]);
    let mut home = HomeViewModel::new(memory_favorites(), 2);

    home.load_first_page_with(&catalog, None).await;
    home.set_search_text("mm");
    assert_eq!(ids(home.displayed_items()), vec![3]);

    home.load_first_page_with(&catalog, None).await;
    assert_eq!(ids(home.displayed_items()), vec![3]);

    home.set_search_text("zzz");
    assert_eq!(home.state.error, Some(ApiError::SearchError));
    assert_eq!(ids(&home.state.visible_items), vec![1, 2]);

    home.set_search_text("");
    assert_eq!(home.state.error, None);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_pages() {
    let mut home = HomeViewModel::new(memory_favorites(), 10);
    home.load_first_page_with(&FakeCatalog::with_items(GiveawayItem::mock_list(4)), None)
        .await;

    home.load_first_page_with(&FakeCatalog::failing(ApiError::NoNetwork), None)
        .await;

    assert_eq!(home.state.error, Some(ApiError::NoNetwork));
    assert_eq!(home.state.visible_items.len(), 4);
    assert!(!home.state.is_loading);
}

#[tokio::test]
async fn favorites_persist_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let catalog = FakeCatalog::with_items(GiveawayItem::mock_list(5));

    {
        let mut home = HomeViewModel::new(file_favorites(&path), 10);
        home.load_first_page_with(&catalog, None).await;
        let third = home.state.visible_items[2].clone();
        dispatch(&mut home, &catalog, HomeEvent::ToggleFavorite(third)).await;
        assert!(home.state.visible_items[2].is_favorite);
    }

    let favorites = file_favorites(&path);
    assert_eq!(ids(&favorites.favorites()), vec![3]);

    let mut home = HomeViewModel::new(favorites, 10);
    home.load_first_page_with(&catalog, None).await;
    let flagged: Vec<i64> = home
        .state
        .visible_items
        .iter()
        .filter(|item| item.is_favorite)
        .map(|item| item.id)
        .collect();
    assert_eq!(flagged, vec![3]);
}

#[tokio::test]
async fn detail_opened_from_home_shares_favorites() {
    let catalog = FakeCatalog::with_items(GiveawayItem::mock_list(3));
    let favorites = memory_favorites();
    let mut home = HomeViewModel::new(Arc::clone(&favorites), 10);
    home.load_first_page_with(&catalog, None).await;

    let second = home.state.visible_items[1].clone();
    let actions = dispatch(&mut home, &catalog, HomeEvent::SelectItem(second)).await;
    assert_eq!(
        actions,
        vec![Action::OpenDetail {
            item_id: 2,
            is_favorite: false
        }]
    );

    let mut detail = home.state.selected_detail.clone().unwrap();
    dispatch(&mut detail, &catalog, DetailEvent::Load).await;
    assert_eq!(detail.state.item.as_ref().map(|item| item.id), Some(2));

    dispatch(&mut detail, &catalog, DetailEvent::ToggleFavorite).await;
    assert!(favorites.contains(2));

    let back = dispatch(&mut detail, &catalog, DetailEvent::PressBack).await;
    assert_eq!(back, vec![Action::CloseDetail]);
    dispatch(&mut home, &catalog, HomeEvent::CloseDetail).await;
    assert!(home.state.selected_detail.is_none());
}

#[tokio::test]
async fn missing_detail_is_no_data() {
    let catalog = FakeCatalog::with_items(GiveawayItem::mock_list(1));
    let mut detail = giveaway::DetailViewModel::new(99, false, memory_favorites());

    dispatch(&mut detail, &catalog, DetailEvent::Load).await;
    assert_eq!(detail.state.error, Some(ApiError::NoData));
    assert!(detail.state.item.is_none());
}

#[tokio::test]
async fn more_screen_groups_by_platform() {
    let catalog = FakeCatalog::with_items(vec![
        item(1, "Fortnite Pack", "PC, Epic Games Store"),
        item(2, "Mario Bonus", "Switch"),
        item(3, "Cloud Key", "PC, Epic Games Store, GOG"),
    ]);
    let favorites = memory_favorites();
    let mut more = MoreViewModel::new(Arc::clone(&favorites), 2);

    more.load_with(&catalog).await;
    assert_eq!(ids(&more.state.carousel_items), vec![1, 2]);
    assert_eq!(ids(&more.state.sections["Epic Games Store"]), vec![1, 3]);
    assert_eq!(ids(&more.state.sections["Switch"]), vec![2]);
    assert!(more.state.sections["Ubisoft"].is_empty());

    let sent = catalog.filters.lock().unwrap()[0].clone();
    assert_eq!(sent, Some(MoreViewModel::featured_filter()));

    let cloud = more.state.sections["GOG"][0].clone();
    dispatch(&mut more, &catalog, MoreEvent::ToggleFavorite(cloud)).await;
    assert!(more.state.sections["Epic Games Store"][1].is_favorite);
    assert!(favorites.contains(3));
}
