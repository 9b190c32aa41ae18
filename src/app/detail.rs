//! Detail screen state.
//!
//! The caller seeds the favorite flag when opening the screen; the fetched
//! record takes that flag rather than consulting the store again.

use crate::app::runtime::{Response, Screen};
use crate::app::Action;
use crate::domain::{ApiError, ApiResult, GiveawayItem};
use crate::storage::FavoritesStore;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub item_id: i64,
    pub is_favorite: bool,
    pub item: Option<GiveawayItem>,
    pub is_loading: bool,
    pub error: Option<ApiError>,
}

/// Events accepted by [`DetailViewModel::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    Load,
    DetailResponse {
        item_id: i64,
        result: ApiResult<Option<GiveawayItem>>,
    },
    ToggleFavorite,
    PressBack,
}

/// State manager for a single giveaway.
#[derive(Debug, Clone)]
pub struct DetailViewModel {
    pub state: DetailState,
    favorites: Arc<FavoritesStore>,
}

impl DetailViewModel {
    #[must_use]
    pub fn new(item_id: i64, is_favorite: bool, favorites: Arc<FavoritesStore>) -> Self {
        Self {
            state: DetailState {
                item_id,
                is_favorite,
                item: None,
                is_loading: false,
                error: None,
            },
            favorites,
        }
    }

    #[must_use]
    pub const fn item_id(&self) -> i64 {
        self.state.item_id
    }

    /// Starts loading the record.
    pub fn load(&mut self) -> Vec<Action> {
        self.state.is_loading = true;
        vec![Action::FetchDetail {
            item_id: self.state.item_id,
        }]
    }

    /// Applies a detail fetch outcome. Responses for another item are ignored.
    pub fn apply_detail_response(
        &mut self,
        item_id: i64,
        result: ApiResult<Option<GiveawayItem>>,
    ) -> bool {
        if item_id != self.state.item_id {
            tracing::debug!(item_id, expected = self.state.item_id, "ignoring detail for other item");
            return false;
        }

        self.state.is_loading = false;
        match result {
            Ok(Some(mut item)) => {
                item.is_favorite = self.state.is_favorite;
                self.state.item = Some(item);
                self.state.error = None;
            }
            Ok(None) => self.state.error = Some(ApiError::NoData),
            Err(error) => {
                tracing::debug!(error = %error, "detail fetch failed");
                self.state.error = Some(error);
            }
        }
        true
    }

    /// Flips the favorite flag of the loaded record and records it in the
    /// store. No-op when nothing is loaded.
    pub fn toggle_favorite(&mut self) -> bool {
        let Some(item) = self.state.item.as_mut() else {
            tracing::debug!("toggle ignored, no item loaded");
            return false;
        };

        item.is_favorite = !item.is_favorite;
        self.state.is_favorite = item.is_favorite;
        self.favorites.apply_toggle(item);
        true
    }

    /// Asks the host to dismiss the screen.
    #[must_use]
    pub fn press_back(&self) -> Vec<Action> {
        vec![Action::CloseDetail]
    }

    pub fn handle_event(&mut self, event: DetailEvent) -> (bool, Vec<Action>) {
        let _span = tracing::debug_span!("detail_event", item_id = self.state.item_id).entered();

        match event {
            DetailEvent::Load => (true, self.load()),
            DetailEvent::DetailResponse { item_id, result } => {
                (self.apply_detail_response(item_id, result), vec![])
            }
            DetailEvent::ToggleFavorite => (self.toggle_favorite(), vec![]),
            DetailEvent::PressBack => (false, self.press_back()),
        }
    }
}

impl Screen for DetailViewModel {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: DetailEvent) -> (bool, Vec<Action>) {
        Self::handle_event(self, event)
    }

    fn response_event(response: Response) -> Option<DetailEvent> {
        match response {
            Response::Detail { item_id, result } => {
                Some(DetailEvent::DetailResponse { item_id, result })
            }
            Response::Giveaways { .. } => None,
        }
    }
}
