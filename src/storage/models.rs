//! Preference keys and change notifications.
//!
//! Every value in the key-value store lives under a [`PreferenceKey`]. When a
//! value is written, subscribers receive a [`PreferenceChange`] naming exactly
//! which key changed.

/// Logical keys of persisted preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// JSON array of favorited giveaway snapshots.
    FavoriteGiveaways,
}

impl PreferenceKey {
    /// Storage key under which the value is persisted.
    ///
    /// Kept identical to the key used by earlier releases so existing
    /// favorites survive an upgrade.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::FavoriteGiveaways => "kAPPFavoriteGiveAways",
        }
    }
}

/// Notification delivered to subscribers after a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceChange {
    pub key: PreferenceKey,
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);
