//! Application layer: screen state managers, events and actions.
//!
//! Every screen is a plain `&mut self` state machine. Presentation feeds it
//! events; it mutates its state and returns [`Action`]s. The runtime performs
//! the catalog fetches among them and feeds each response back as an event.
//!
//! ```text
//! Presentation -> Event -> handle_event -> State Mutations -> Actions
//!                               ^                               |
//!                               +------ runtime::execute -------+
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by event handling
//! - [`home`]: Paginated, searchable home list (the core)
//! - [`detail`]: Single giveaway screen
//! - [`more`]: Carousel and per-platform sections
//! - [`lookup`]: Multi-select filter pickers
//! - [`pagination`]: Chunking and id-based list helpers
//! - [`runtime`]: Fetch execution and the event loop driver

pub mod actions;
pub mod detail;
pub mod home;
pub mod lookup;
pub mod more;
pub mod pagination;
pub mod runtime;

pub use actions::Action;
pub use detail::{DetailEvent, DetailState, DetailViewModel};
pub use home::{HomeEvent, HomeState, HomeViewModel, Page};
pub use lookup::{build_filter, LookupEvent, LookupFieldState, LookupFieldViewModel};
pub use more::{MoreEvent, MoreState, MoreViewModel};
pub use runtime::{dispatch, execute, Response, Screen};
