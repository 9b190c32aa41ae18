//! Actions representing side effects requested by the state managers.
//!
//! State managers never perform I/O themselves. Handling an event mutates
//! state and returns a `Vec<Action>`; the [`runtime`](crate::app::runtime)
//! performs catalog fetches and feeds the outcome back as an event, while
//! navigation actions are left for the host to act on.
//!
//! # Example
//!
//! ```
//! use giveaway::app::Action;
//!
//! let action = Action::FetchGiveaways { request_id: 1, filter: None };
//! assert!(action.is_fetch());
//! assert!(!Action::CloseDetail.is_fetch());
//! ```

use crate::domain::GiveawayFilter;

/// Commands produced by event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetches the catalog list, optionally filtered.
    ///
    /// The `request_id` comes back with the response so stale results can be
    /// told apart from the latest one.
    FetchGiveaways {
        request_id: u64,
        filter: Option<GiveawayFilter>,
    },

    /// Fetches the full record of one item.
    FetchDetail {
        item_id: i64,
    },

    /// The host should present the detail screen for this item.
    OpenDetail {
        item_id: i64,
        is_favorite: bool,
    },

    /// The host should dismiss the detail screen.
    CloseDetail,
}

impl Action {
    /// Whether the runtime resolves this action against the catalog.
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::FetchGiveaways { .. } | Self::FetchDetail { .. })
    }
}
