//! Configuration for release-watch

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::update::types::{RepoId, TrackedPlugin};

// =============================================================================
// Time-related constants
// =============================================================================

/// How long a resolved release stays cached (one hour)
pub const RELEASE_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Timeout applied to each release request (5 seconds)
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay between starting each release request to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

/// Default interval between watch-mode cycles, matching the cache TTL
pub const DEFAULT_CYCLE_INTERVAL_SECS: u64 = 60 * 60;

/// Identifier shape: slash-separated segments of word characters, dots
/// and dashes
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+(/[\w.-]+)*$").expect("identifier regex"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk configuration maintained by the administrator
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WatchConfig {
    /// Token for authenticated API calls; shared across all plugins
    pub access_token: Option<String>,
    /// Directory holding the installed plugin artifacts
    pub plugins_dir: PathBuf,
    /// Map from plugin identifier to `owner/name` repository
    pub plugins: IndexMap<String, String>,
}

impl WatchConfig {
    /// Loads and parses the configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Validated plugin entries, in configuration order.
    ///
    /// Entries with a malformed identifier or repository are dropped
    /// with a warning; a bad entry never fails the rest of the set.
    pub fn tracked_plugins(&self) -> Vec<TrackedPlugin> {
        self.plugins
            .iter()
            .filter_map(|(identifier, repo)| {
                if !valid_identifier(identifier) {
                    warn!(
                        "Dropping plugin entry with invalid identifier {:?}",
                        identifier
                    );
                    return None;
                }
                match repo.parse::<RepoId>() {
                    Ok(repo) => Some(TrackedPlugin {
                        identifier: identifier.clone(),
                        repo,
                    }),
                    Err(e) => {
                        warn!("Dropping plugin entry {:?}: {}", identifier, e);
                        None
                    }
                }
            })
            .collect()
    }
}

/// A valid identifier is a relative path without dot-only segments
fn valid_identifier(identifier: &str) -> bool {
    IDENTIFIER_RE.is_match(identifier)
        && identifier
            .split('/')
            .all(|segment| segment.chars().any(|c| c != '.'))
}

/// Returns the path to the data directory for release-watch.
/// Uses $XDG_DATA_HOME/release-watch if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/release-watch,
/// or ./release-watch if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("release-watch")
}
