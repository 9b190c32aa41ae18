//! Domain layer for the giveaway client.
//!
//! Core types shared by every other layer, free of HTTP or storage concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`giveaway`]: Catalog item and request filter models
//! - [`lookup`]: Filter picker vocabularies (platforms, types, sort orders)
//!
//! # Examples
//!
//! ```
//! use giveaway::domain::{GiveawayFilter, FilterPlatform};
//!
//! let filter = GiveawayFilter::platform(FilterPlatform::Steam.value());
//! assert_eq!(filter.platform.as_deref(), Some("steam"));
//! ```

pub mod error;
pub mod giveaway;
pub mod lookup;

pub use error::{ApiError, ApiResult, GiveawayError, Result};
pub use giveaway::{GiveawayFilter, GiveawayItem};
pub use lookup::{FilterPlatform, FilterSortBy, FilterType, LookupItem, LookupType};
