//! Filter picker vocabularies.
//!
//! The catalog accepts a fixed set of platform, type and sort values. Each is
//! modelled as an enum with a display name (what the user sees) and a machine
//! value (what goes in the query string). [`LookupItem`] is the flattened
//! `(name, value)` pair a picker works with.

/// One selectable entry in a filter picker.
///
/// Two items are equal when both their name and value match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupItem {
    pub name: String,
    pub value: String,
}

impl LookupItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Which filter dimension a picker edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupType {
    Platform,
    Type,
    SortBy,
}

impl LookupType {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Platform => "Platform",
            Self::Type => "Type",
            Self::SortBy => "Sort Type",
        }
    }

    /// All entries offered by a picker of this type, in display order.
    #[must_use]
    pub fn items(self) -> Vec<LookupItem> {
        match self {
            Self::Platform => FilterPlatform::ALL
                .iter()
                .map(|p| LookupItem::new(p.name(), p.value()))
                .collect(),
            Self::Type => FilterType::ALL
                .iter()
                .map(|t| LookupItem::new(t.name(), t.value()))
                .collect(),
            Self::SortBy => FilterSortBy::ALL
                .iter()
                .map(|s| LookupItem::new(s.name(), s.value()))
                .collect(),
        }
    }
}

/// Platforms understood by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterPlatform {
    Pc,
    Steam,
    EpicGamesStore,
    Ubisoft,
    Gog,
    Itchio,
    Ps4,
    Ps5,
    XboxOne,
    XboxSeriesXs,
    Xbox360,
    Switch,
    Android,
    Ios,
    Vr,
    BattleNet,
    Origin,
    DrmFree,
}

impl FilterPlatform {
    pub const ALL: [Self; 18] = [
        Self::Pc,
        Self::Steam,
        Self::EpicGamesStore,
        Self::Ubisoft,
        Self::Gog,
        Self::Itchio,
        Self::Ps4,
        Self::Ps5,
        Self::XboxOne,
        Self::XboxSeriesXs,
        Self::Xbox360,
        Self::Switch,
        Self::Android,
        Self::Ios,
        Self::Vr,
        Self::BattleNet,
        Self::Origin,
        Self::DrmFree,
    ];

    /// Display name, as it appears in an item's `platforms` text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pc => "PC",
            Self::Steam => "Steam",
            Self::EpicGamesStore => "Epic Games Store",
            Self::Ubisoft => "Ubisoft",
            Self::Gog => "GOG",
            Self::Itchio => "Itchio",
            Self::Ps4 => "PS4",
            Self::Ps5 => "PS5",
            Self::XboxOne => "Xbox One",
            Self::XboxSeriesXs => "Xbox Series XS",
            Self::Xbox360 => "Xbox 360",
            Self::Switch => "Switch",
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Vr => "VR",
            Self::BattleNet => "BattleNet",
            Self::Origin => "Origin",
            Self::DrmFree => "DRM Free",
        }
    }

    /// Machine value sent as the `platform` query parameter.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Pc => "pc",
            Self::Steam => "steam",
            Self::EpicGamesStore => "epic-games-store",
            Self::Ubisoft => "ubisoft",
            Self::Gog => "gog",
            Self::Itchio => "itchio",
            Self::Ps4 => "ps4",
            Self::Ps5 => "ps5",
            Self::XboxOne => "xbox-one",
            Self::XboxSeriesXs => "xbox-series-xs",
            Self::Xbox360 => "xbox-360",
            Self::Switch => "switch",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Vr => "vr",
            Self::BattleNet => "battlenet",
            Self::Origin => "origin",
            Self::DrmFree => "drm-free",
        }
    }

    /// Looks a platform up by its machine value.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == value)
    }

    /// Quick-filter chips shown above the home list.
    #[must_use]
    pub const fn home_filters() -> [Self; 4] {
        [Self::Pc, Self::Steam, Self::Ios, Self::Android]
    }

    /// Platforms that get their own section on the "More" screen.
    #[must_use]
    pub const fn available_in_more() -> [Self; 6] {
        [
            Self::EpicGamesStore,
            Self::Gog,
            Self::Ubisoft,
            Self::Ps5,
            Self::XboxSeriesXs,
            Self::Switch,
        ]
    }
}

/// Giveaway kinds understood by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    Game,
    Loot,
    Beta,
}

impl FilterType {
    pub const ALL: [Self; 3] = [Self::Game, Self::Loot, Self::Beta];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Game => "Game",
            Self::Loot => "Loot",
            Self::Beta => "Beta",
        }
    }

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Loot => "loot",
            Self::Beta => "beta",
        }
    }
}

/// Sort orders understood by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterSortBy {
    Date,
    Value,
    Popularity,
}

impl FilterSortBy {
    pub const ALL: [Self; 3] = [Self::Date, Self::Value, Self::Popularity];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Value => "Value",
            Self::Popularity => "Popularity",
        }
    }

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Value => "value",
            Self::Popularity => "popularity",
        }
    }
}
