//! Platform data locations.
//!
//! Preferences and logs live under the platform data directory reported by
//! `directories`, e.g. `~/.local/share/giveaway` on Linux. When no home
//! directory can be determined, a relative `.giveaway` directory is used.

use std::path::{Path, PathBuf};

/// File name of the preference document inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// File name of the log file inside the data directory.
pub const LOG_FILE: &str = "giveaway.log";

/// Returns the default data directory.
///
/// # Examples
///
/// ```
/// use giveaway::infrastructure::default_data_dir;
///
/// let dir = default_data_dir();
/// assert!(dir
///     .components()
///     .any(|c| c.as_os_str().to_string_lossy().contains("giveaway")));
/// ```
#[must_use]
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "gamerpower", "giveaway").map_or_else(
        || {
            tracing::debug!("no platform data directory, falling back to working directory");
            PathBuf::from(".giveaway")
        },
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

/// Resolves the data directory: `configured` when given, the platform
/// default otherwise. A leading `~` expands to the home directory.
#[must_use]
pub fn resolve_data_dir(configured: Option<&Path>) -> PathBuf {
    configured.map_or_else(default_data_dir, expand_tilde)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without `~`, or with no resolvable home, are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    directories::BaseDirs::new().map_or_else(
        || path.to_path_buf(),
        |base| base.home_dir().join(rest),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_untouched() {
        let path = Path::new("/var/lib/giveaway");
        assert_eq!(expand_tilde(path), path);
        assert_eq!(resolve_data_dir(Some(path)), path);
    }

    #[test]
    fn tilde_is_expanded_when_home_exists() {
        let expanded = expand_tilde(Path::new("~/giveaway"));
        if directories::BaseDirs::new().is_some() {
            assert!(!expanded.starts_with("~"));
            assert!(expanded.ends_with("giveaway"));
        }
    }

    #[test]
    fn default_dir_names_the_application() {
        // The application name is not always the last component.
        let dir = default_data_dir();
        assert!(
            dir.components()
                .any(|c| c.as_os_str().to_string_lossy().contains("giveaway")),
            "{dir:?}"
        );
    }

    #[test]
    fn unconfigured_uses_platform_default() {
        assert_eq!(resolve_data_dir(None), default_data_dir());
    }
}
