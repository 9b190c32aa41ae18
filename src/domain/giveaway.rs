//! Catalog item and request filter models.
//!
//! [`GiveawayItem`] mirrors one record of the GamerPower API plus the
//! client-only `is_favorite` flag. [`GiveawayFilter`] is the optional
//! platform/type/sort constraint sent to the `/filter` endpoint.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Timestamp layout used by the API for `published_date` and `end_date`.
const API_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator the API accepts between multiple values of one filter field.
pub const MULTI_VALUE_SEPARATOR: &str = ".";

/// One giveaway record from the catalog.
///
/// Every field except `id` may be missing from the payload. `is_favorite` is
/// never sent by the server; it is merged in from the favorites store after a
/// fetch and persisted with favorite snapshots.
///
/// Equality and hashing use `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiveawayItem {
    pub id: i64,
    pub title: Option<String>,
    pub worth: Option<String>,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub open_giveaway_url: Option<String>,
    pub published_date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub platforms: Option<String>,
    pub end_date: Option<String>,
    pub users: Option<i64>,
    pub status: Option<String>,
    pub gamerpower_url: Option<String>,
    pub open_giveaway: Option<String>,

    #[serde(rename = "isFavorite", default)]
    pub is_favorite: bool,
}

impl PartialEq for GiveawayItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GiveawayItem {}

impl Hash for GiveawayItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl GiveawayItem {
    /// Splits the free-text platform list (`"PC, Steam"`) into trimmed names.
    ///
    /// # Examples
    ///
    /// ```
    /// use giveaway::GiveawayItem;
    ///
    /// let item = GiveawayItem::mock(1);
    /// assert_eq!(item.platform_list(), vec!["PC", "Steam"]);
    /// ```
    #[must_use]
    pub fn platform_list(&self) -> Vec<&str> {
        self.platforms
            .as_deref()
            .map(|p| {
                p.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the free-text platform list mentions `platform_name`.
    #[must_use]
    pub fn is_on_platform(&self, platform_name: &str) -> bool {
        self.platforms
            .as_deref()
            .is_some_and(|p| p.contains(platform_name))
    }

    /// Parsed publication timestamp, `None` when absent or `"N/A"`.
    #[must_use]
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        parse_api_date(self.published_date.as_deref())
    }

    /// Parsed end timestamp, `None` when absent or `"N/A"`.
    #[must_use]
    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        parse_api_date(self.end_date.as_deref())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("Active")
    }

    /// Whether the title contains `query`, ignoring case.
    ///
    /// Items without a title never match.
    #[must_use]
    pub fn title_contains(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title
            .as_deref()
            .is_some_and(|title| title.to_lowercase().contains(&query))
    }

    /// Canned item used by preview mode and tests.
    #[must_use]
    pub fn mock(id: i64) -> Self {
        Self {
            id,
            title: Some("HUMANKIND - Cultures of Latin America Pack (Steam) Giveaway".to_string()),
            worth: Some("$8.99".to_string()),
            thumbnail: Some("https://www.gamerpower.com/offers/1/6792f42873621.jpg".to_string()),
            image: Some("https://www.gamerpower.com/offers/1b/6792f42873621.jpg".to_string()),
            description: Some(
                "Claim your free HUMANKIND - Cultures of Latin America Pack (DLC) via Steam! \
                 Each pack includes 6 new cultures, 6 new wonders and much more!"
                    .to_string(),
            ),
            instructions: Some(
                "1. Click the button to visit the giveaway page.\r\n\
                 2. Download this pack directly via Steam before expires.\r\n\
                 3. Please note the base game via Steam is required to enjoy this content."
                    .to_string(),
            ),
            open_giveaway_url: Some(
                "https://www.gamerpower.com/open/humankind-cultures-of-latin-america-pack-steam-giveaway"
                    .to_string(),
            ),
            published_date: Some("2025-01-23 21:00:08".to_string()),
            kind: Some("DLC".to_string()),
            platforms: Some("PC, Steam".to_string()),
            end_date: Some("2025-01-30 23:59:00".to_string()),
            users: Some(360),
            status: Some("Active".to_string()),
            gamerpower_url: Some(
                "https://www.gamerpower.com/humankind-cultures-of-latin-america-pack-steam-giveaway"
                    .to_string(),
            ),
            open_giveaway: Some(
                "https://www.gamerpower.com/open/humankind-cultures-of-latin-america-pack-steam-giveaway"
                    .to_string(),
            ),
            is_favorite: false,
        }
    }

    /// `count` canned items with ids `1..=count`.
    #[must_use]
    pub fn mock_list(count: usize) -> Vec<Self> {
        (1..=count as i64).map(Self::mock).collect()
    }
}

fn parse_api_date(raw: Option<&str>) -> Option<NaiveDateTime> {
    raw.and_then(|s| NaiveDateTime::parse_from_str(s.trim(), API_DATE_FORMAT).ok())
}

/// Optional constraint for the `/filter` endpoint.
///
/// A `None` field means "no constraint on that dimension".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiveawayFilter {
    pub platform: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "sort-by")]
    pub sort_by: Option<String>,
}

impl GiveawayFilter {
    /// Filter constrained to a single platform machine value.
    #[must_use]
    pub fn platform(value: impl Into<String>) -> Self {
        Self {
            platform: Some(value.into()),
            ..Self::default()
        }
    }

    /// Builds a filter from multi-select picker values.
    ///
    /// Multiple values of one field are joined with `.`, the API's separator.
    /// Returns `None` when nothing is selected at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use giveaway::GiveawayFilter;
    ///
    /// let filter = GiveawayFilter::from_selections(&["pc", "steam"], &[], &["date"]).unwrap();
    /// assert_eq!(filter.platform.as_deref(), Some("pc.steam"));
    /// assert_eq!(filter.kind, None);
    /// assert_eq!(filter.sort_by.as_deref(), Some("date"));
    ///
    /// assert!(GiveawayFilter::from_selections::<&str>(&[], &[], &[]).is_none());
    /// ```
    #[must_use]
    pub fn from_selections<S: AsRef<str>>(
        platforms: &[S],
        kinds: &[S],
        sorts: &[S],
    ) -> Option<Self> {
        let filter = Self {
            platform: join_values(platforms),
            kind: join_values(kinds),
            sort_by: join_values(sorts),
        };
        (!filter.is_empty()).then_some(filter)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platform.is_none() && self.kind.is_none() && self.sort_by.is_none()
    }

    /// Query pairs for the request, skipping absent fields.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("platform", self.platform.as_deref()),
            ("type", self.kind.as_deref()),
            ("sort-by", self.sort_by.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

fn join_values<S: AsRef<str>>(values: &[S]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(MULTI_VALUE_SEPARATOR),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 3091,
        "title": "Tchia (Epic Games) Giveaway",
        "worth": "$29.99",
        "thumbnail": "https://www.gamerpower.com/offers/1/abc.jpg",
        "image": "https://www.gamerpower.com/offers/1b/abc.jpg",
        "description": "Grab it free",
        "instructions": "1. Click",
        "open_giveaway_url": "https://www.gamerpower.com/open/tchia",
        "published_date": "2025-01-23 16:00:00",
        "type": "Game",
        "platforms": "PC, Epic Games Store",
        "end_date": "N/A",
        "users": 12040,
        "status": "Active",
        "gamerpower_url": "https://www.gamerpower.com/tchia",
        "open_giveaway": "https://www.gamerpower.com/open/tchia"
    }"#;

    #[test]
    fn decodes_api_payload_without_favorite_flag() {
        let item: GiveawayItem = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(item.id, 3091);
        assert_eq!(item.kind.as_deref(), Some("Game"));
        assert_eq!(item.users, Some(12040));
        assert!(!item.is_favorite);
        assert!(item.is_active());
        assert!(item.is_on_platform("Epic Games Store"));
        assert_eq!(item.platform_list(), vec!["PC", "Epic Games Store"]);
    }

    #[test]
    fn favorite_flag_round_trips_under_its_stored_key() {
        let mut item = GiveawayItem::mock(7);
        item.is_favorite = true;
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["isFavorite"], serde_json::Value::Bool(true));
        assert_eq!(json["type"], "DLC");

        let back: GiveawayItem = serde_json::from_value(json).unwrap();
        assert!(back.is_favorite);
    }

    #[test]
    fn decodes_sparse_payload() {
        let item: GiveawayItem = serde_json::from_str(r#"{"id": 1, "title": null}"#).unwrap();
        assert!(item.title.is_none());
        assert!(item.platform_list().is_empty());
        assert!(!item.title_contains("a"));
    }

    #[test]
    fn dates_parse_and_na_is_none() {
        let item: GiveawayItem = serde_json::from_str(SAMPLE).unwrap();
        let published = item.published_at().unwrap();
        assert_eq!(published.format("%Y-%m-%d").to_string(), "2025-01-23");
        assert!(item.ends_at().is_none());
    }

    #[test]
    fn equality_is_by_identifier() {
        let a = GiveawayItem::mock(1);
        let mut b = GiveawayItem::mock(1);
        b.title = Some("Other".to_string());
        b.is_favorite = true;
        assert_eq!(a, b);
        assert_ne!(a, GiveawayItem::mock(2));
    }

    #[test]
    fn title_search_ignores_case() {
        let item = GiveawayItem::mock(1);
        assert!(item.title_contains("latin america"));
        assert!(item.title_contains("HUMANKIND"));
        assert!(!item.title_contains("No Match"));
    }

    #[test]
    fn filter_query_skips_absent_fields() {
        let filter = GiveawayFilter {
            platform: Some("steam".to_string()),
            kind: None,
            sort_by: Some("popularity".to_string()),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("platform", "steam"), ("sort-by", "popularity")]
        );
        assert!(GiveawayFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn mock_list_has_sequential_ids() {
        let items = GiveawayItem::mock_list(3);
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
