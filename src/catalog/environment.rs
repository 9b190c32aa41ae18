//! Deployment environment of the client.

use serde::{Deserialize, Serialize};

/// Environment variable that forces preview mode regardless of configuration.
pub const PREVIEW_ENV_VAR: &str = "GIVEAWAY_PREVIEW";

/// Where the client is running.
///
/// Only [`AppEnvironment::Preview`] changes behavior: the catalog client then
/// answers every request with canned data and never touches the network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Testing,
    Staging,
    #[default]
    Release,
    Preview,
}

impl AppEnvironment {
    /// Whether canned responses should be served.
    ///
    /// True for [`AppEnvironment::Preview`] or when `GIVEAWAY_PREVIEW=1` is set.
    #[must_use]
    pub fn is_preview(self) -> bool {
        self == Self::Preview || std::env::var(PREVIEW_ENV_VAR).is_ok_and(|v| v == "1")
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Staging => "staging",
            Self::Release => "release",
            Self::Preview => "preview",
        }
    }
}

impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
