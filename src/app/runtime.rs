//! Executes fetch actions and routes responses back to their screen.
//!
//! ```text
//! Event -> Screen::handle_event -> Actions -> execute -> Response -> Event
//!                ^                                                    |
//!                +----------------------------------------------------+
//! ```
//!
//! [`dispatch`] runs that loop until no fetch remains. Navigation actions
//! are returned to the caller untouched.

use crate::app::Action;
use crate::catalog::CatalogClient;
use crate::domain::{ApiResult, GiveawayItem};
use std::collections::VecDeque;

/// Outcome of a fetch action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Giveaways {
        request_id: u64,
        result: ApiResult<Option<Vec<GiveawayItem>>>,
    },
    Detail {
        item_id: i64,
        result: ApiResult<Option<GiveawayItem>>,
    },
}

/// A state manager driven by events.
pub trait Screen {
    type Event;

    /// Applies `event`. Returns whether visible state changed and the actions
    /// to perform.
    fn handle_event(&mut self, event: Self::Event) -> (bool, Vec<Action>);

    /// Converts a fetch outcome into this screen's event, or `None` if the
    /// screen does not consume it.
    fn response_event(response: Response) -> Option<Self::Event>;
}

/// Performs a fetch action. Returns `None` for non-fetch actions.
pub async fn execute<C: CatalogClient>(client: &C, action: &Action) -> Option<Response> {
    match action {
        Action::FetchGiveaways { request_id, filter } => {
            let result = client.giveaways(filter.as_ref()).await;
            Some(Response::Giveaways {
                request_id: *request_id,
                result,
            })
        }
        Action::FetchDetail { item_id } => {
            let result = client.giveaway_detail(*item_id).await;
            Some(Response::Detail {
                item_id: *item_id,
                result,
            })
        }
        Action::OpenDetail { .. } | Action::CloseDetail => None,
    }
}

/// Feeds `event` to `screen`, executing every resulting fetch and feeding
/// the responses back until the screen settles.
///
/// Returns the non-fetch actions in the order they were produced.
pub async fn dispatch<S, C>(screen: &mut S, client: &C, event: S::Event) -> Vec<Action>
where
    S: Screen,
    C: CatalogClient,
{
    let mut pending = VecDeque::from([event]);
    let mut passthrough = Vec::new();

    while let Some(event) = pending.pop_front() {
        let (_, actions) = screen.handle_event(event);
        for action in actions {
            if !action.is_fetch() {
                passthrough.push(action);
                continue;
            }
            let Some(response) = execute(client, &action).await else {
                continue;
            };
            match S::response_event(response) {
                Some(event) => pending.push_back(event),
                None => tracing::debug!(action = ?action, "response not consumed by screen"),
            }
        }
    }

    passthrough
}
