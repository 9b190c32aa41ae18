//! Giveaway: a client core for browsing free game giveaways.
//!
//! The crate fetches promotions from the GamerPower catalog API and provides:
//! - A paginated, searchable home list with quick platform filters
//! - Locally persisted favorites merged into every fresh fetch
//! - Per-item detail and a per-platform "More" overview
//! - Multi-select filter pickers producing catalog queries

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI front end (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machines
//! │  - Event handling                                   │
//! │  - Pagination, search, favorite toggles             │
//! │  - Action runtime                                   │
//! └─────────────────────────────────────────────────────┘
//!              │                          │
//! ┌─────────────────────────┐   ┌─────────────────────────┐
//! │ Catalog Layer           │   │ Storage Layer           │
//! │ (catalog/)              │   │ (storage/)              │
//! │ - reqwest client        │   │ - Favorites store       │
//! │ - Error mapping         │   │ - JSON key-value file   │
//! │ - Connectivity          │   │ - Change notifications  │
//! └─────────────────────────┘   └─────────────────────────┘
//!              │                          │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Giveaway and filter models (domain/)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber with rotating log file        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! base_url = "https://www.gamerpower.com/api/"
//! environment = "release"
//! page_size = 10
//! carousel_size = 5
//! request_timeout_secs = 30
//! data_dir = "~/.local/share/giveaway"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use giveaway::{initialize, Config};
//!
//! # async fn run() -> giveaway::Result<()> {
//! let app = initialize(&Config::default())?;
//! let mut home = app.home();
//! home.load_first_page_with(app.client(), None).await;
//!
//! for item in home.displayed_items() {
//!     println!("{}", item.title.as_deref().unwrap_or("untitled"));
//! }
//! if home.state.has_more_pages {
//!     home.load_next_page();
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;

pub use app::{
    Action, DetailViewModel, HomeEvent, HomeViewModel, LookupFieldViewModel, MoreViewModel,
};
pub use catalog::{AppEnvironment, CatalogClient, HttpCatalogClient, NetworkMonitor};
pub use domain::{ApiError, ApiResult, GiveawayError, GiveawayFilter, GiveawayItem, Result};

use crate::domain::LookupType;
use crate::infrastructure::{resolve_data_dir, PREFERENCES_FILE};
use crate::storage::{FavoritesStore, JsonFileStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Client configuration, usually read from a TOML file.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the catalog API. Default: `https://www.gamerpower.com/api/`
    pub base_url: String,

    /// Deployment environment. `preview` serves canned data offline.
    pub environment: AppEnvironment,

    /// Items per page of the home list. Default: 10
    pub page_size: usize,

    /// Items in the "More" carousel. Default: 5
    pub carousel_size: usize,

    /// Per-request timeout in seconds. Default: 30
    pub request_timeout_secs: u64,

    /// Directory for preferences and logs. Default: the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `giveaway=trace`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://www.gamerpower.com/api/".to_string(),
            environment: AppEnvironment::default(),
            page_size: 10,
            carousel_size: 5,
            request_timeout_secs: 30,
            data_dir: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GiveawayError::Config`] if the text is not valid TOML for
    /// this structure or a size is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use giveaway::{AppEnvironment, Config};
    ///
    /// let config = Config::from_toml_str("page_size = 20\nenvironment = \"preview\"")?;
    /// assert_eq!(config.page_size, 20);
    /// assert_eq!(config.environment, AppEnvironment::Preview);
    /// assert_eq!(config.carousel_size, 5);
    /// # Ok::<(), giveaway::GiveawayError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| GiveawayError::Config(format!("failed to parse config TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(GiveawayError::Config("page_size must be at least 1".to_string()));
        }
        if self.carousel_size == 0 {
            return Err(GiveawayError::Config(
                "carousel_size must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(GiveawayError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Composition root: the shared client, connectivity flag and favorites.
///
/// Screens are created from here so they all share one favorites store.
#[derive(Debug)]
pub struct App {
    config: Config,
    client: Arc<HttpCatalogClient>,
    network: Arc<NetworkMonitor>,
    favorites: Arc<FavoritesStore>,
}

impl App {
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn client(&self) -> &Arc<HttpCatalogClient> {
        &self.client
    }

    /// Reachability flag consulted before every request.
    #[must_use]
    pub fn network(&self) -> &NetworkMonitor {
        &self.network
    }

    #[must_use]
    pub const fn favorites(&self) -> &Arc<FavoritesStore> {
        &self.favorites
    }

    #[must_use]
    pub fn home(&self) -> HomeViewModel {
        HomeViewModel::new(Arc::clone(&self.favorites), self.config.page_size)
    }

    #[must_use]
    pub fn more(&self) -> MoreViewModel {
        MoreViewModel::new(Arc::clone(&self.favorites), self.config.carousel_size)
    }

    #[must_use]
    pub fn detail(&self, item_id: i64, is_favorite: bool) -> DetailViewModel {
        DetailViewModel::new(item_id, is_favorite, Arc::clone(&self.favorites))
    }

    #[must_use]
    pub fn lookup(&self, lookup_type: LookupType) -> LookupFieldViewModel {
        LookupFieldViewModel::new(lookup_type)
    }
}

/// Builds the application from configuration.
///
/// Opens (or creates) the preference file in the data directory, builds the
/// HTTP client and the network monitor. A preference file that cannot be
/// parsed is moved aside to `preferences.json.corrupt` and replaced by an
/// empty one.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created, the preference
/// file cannot be opened or the HTTP client cannot be built.
pub fn initialize(config: &Config) -> Result<App> {
    let data_dir = resolve_data_dir(config.data_dir.as_deref());
    tracing::debug!(
        data_dir = ?data_dir,
        environment = %config.environment,
        "initializing giveaway client"
    );
    std::fs::create_dir_all(&data_dir)?;

    let backend = open_preferences(data_dir.join(PREFERENCES_FILE))?;
    let favorites = Arc::new(FavoritesStore::new(Box::new(backend)));

    let network = Arc::new(NetworkMonitor::default());
    let client = Arc::new(HttpCatalogClient::new(
        &config.base_url,
        config.request_timeout(),
        config.environment,
        Arc::clone(&network) as Arc<dyn catalog::Connectivity>,
    )?);

    Ok(App {
        config: config.clone(),
        client,
        network,
        favorites,
    })
}

fn open_preferences(path: PathBuf) -> Result<JsonFileStore> {
    match JsonFileStore::new(path.clone()) {
        Err(GiveawayError::Storage(reason)) => {
            let aside = path.with_extension("json.corrupt");
            tracing::warn!(
                reason = %reason,
                moved_to = ?aside,
                "preference file unreadable, starting fresh"
            );
            std::fs::rename(&path, &aside)?;
            JsonFileStore::new(path)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> Config {
        Config {
            data_dir: Some(dir.to_path_buf()),
            environment: AppEnvironment::Preview,
            ..Config::default()
        }
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let result = Config::from_toml_str("page_size = 0");
        assert!(matches!(result, Err(GiveawayError::Config(_))));
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let result = Config::from_toml_str("environment = \"production\"");
        assert!(matches!(result, Err(GiveawayError::Config(_))));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("giveaway.toml");
        std::fs::write(&path, "carousel_size = 3\ntrace_level = \"debug\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.carousel_size, 3);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let result = Config::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(GiveawayError::Io(_))));
    }

    #[test]
    fn initialize_shares_one_favorites_store() {
        let dir = tempfile::tempdir().unwrap();
        let app = initialize(&config_in(dir.path())).unwrap();

        let mut detail = app.detail(1, false);
        detail.apply_detail_response(1, Ok(Some(GiveawayItem::mock(1))));
        detail.toggle_favorite();

        assert!(app.favorites().contains(1));
        assert!(dir.path().join(PREFERENCES_FILE).exists());
    }

    #[test]
    fn initialize_recovers_from_corrupt_preferences() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PREFERENCES_FILE), "{ broken").unwrap();

        let app = initialize(&config_in(dir.path())).unwrap();
        assert!(app.favorites().is_empty());
        assert!(dir.path().join("preferences.json.corrupt").exists());
    }

    #[tokio::test]
    async fn preview_app_lists_canned_items() {
        let dir = tempfile::tempdir().unwrap();
        let app = initialize(&config_in(dir.path())).unwrap();

        let mut home = app.home();
        home.load_first_page_with(app.client(), None).await;

        assert_eq!(home.state.visible_items.len(), 10);
        assert!(!home.state.has_more_pages);
        assert_eq!(home.state.error, None);
    }
}
