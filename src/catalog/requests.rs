//! Catalog endpoints.
//!
//! Each [`GiveawayRequest`] knows its path, its query parameters and the
//! canned payload served in preview mode.

use crate::domain::{GiveawayFilter, GiveawayItem};
use serde_json::Value;

/// Number of items in a canned list response.
const MOCK_LIST_LEN: usize = 10;

/// One read operation against the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiveawayRequest {
    /// `GET /giveaways`
    All,
    /// `GET /filter?platform=&type=&sort-by=`
    Filtered(GiveawayFilter),
    /// `GET /giveaway?id=`
    Detail(i64),
}

impl GiveawayRequest {
    /// Picks `/filter` when a filter is given, `/giveaways` otherwise.
    #[must_use]
    pub fn list(filter: Option<&GiveawayFilter>) -> Self {
        filter.map_or(Self::All, |f| Self::Filtered(f.clone()))
    }

    /// Path relative to the API base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::All => "giveaways",
            Self::Filtered(_) => "filter",
            Self::Detail(_) => "giveaway",
        }
    }

    /// Query parameters, absent filter fields omitted.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::All => Vec::new(),
            Self::Filtered(filter) => filter
                .query_pairs()
                .into_iter()
                .map(|(key, value)| (key, value.to_string()))
                .collect(),
            Self::Detail(id) => vec![("id", id.to_string())],
        }
    }

    /// Payload answered in preview mode.
    #[must_use]
    pub fn mock_response(&self) -> Value {
        let payload = match self {
            Self::All | Self::Filtered(_) => {
                serde_json::to_value(GiveawayItem::mock_list(MOCK_LIST_LEN))
            }
            Self::Detail(id) => serde_json::to_value(GiveawayItem::mock(*id)),
        };
        payload.unwrap_or(Value::Null)
    }
}
