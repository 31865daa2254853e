//! Common types for update checking

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::update::error::InvalidRepoId;

/// Shape of one `owner/name` segment: word characters, dots and dashes
static REPO_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+$").expect("repo segment regex"));

/// Repository coordinates in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Human-facing repository page
    pub fn page_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = InvalidRepoId;

    /// Parses `owner/name`, rejecting extra segments and dot-only
    /// segments (no path traversal through the API URL).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((owner, name)) = s.split_once('/') else {
            return Err(InvalidRepoId(s.to_string()));
        };

        let valid = [owner, name].into_iter().all(|segment| {
            REPO_SEGMENT_RE.is_match(segment) && segment.chars().any(|c| c != '.')
        });
        if !valid {
            return Err(InvalidRepoId(s.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// One locally installed plugin registered for release checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPlugin {
    /// Relative path of the plugin artifact under the plugins directory
    pub identifier: String,
    /// Repository the plugin is released from
    pub repo: RepoId,
}

/// Normalized answer from the latest-release endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Release version with any leading `v` stripped
    pub version: String,
    /// URL of the downloadable release archive
    pub download_url: String,
}

/// An available update for one tracked plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    pub plugin_identifier: String,
    pub new_version: String,
    pub source_url: String,
    pub package_url: String,
}
