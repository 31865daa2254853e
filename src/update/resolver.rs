//! GitHub Releases API client

#[cfg(test)]
use mockall::automock;

use serde::Deserialize;
use tracing::warn;

use crate::config::FETCH_TIMEOUT;
use crate::update::error::ResolveError;
use crate::update::semver::normalize_tag;
use crate::update::types::{ReleaseInfo, RepoId};

/// Default base URL for GitHub API
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Response from the latest-release endpoint.
///
/// Both fields must be present for the release to be usable; either may
/// be absent in responses for draft-only or asset-less repositories.
#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: Option<String>,
    zipball_url: Option<String>,
}

/// Trait for fetching the latest published release of a repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches the latest release descriptor for a repository
    ///
    /// # Returns
    /// * `Ok(ReleaseInfo)` - normalized version and archive URL
    /// * `Err(ResolveError)` - any transport, status, or shape failure;
    ///   callers treat every variant as "no update this cycle"
    async fn latest_release(&self, repo: &RepoId) -> Result<ReleaseInfo, ResolveError>;
}

/// `ReleaseSource` implementation for the GitHub Releases API
pub struct GitHubReleases {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubReleases {
    /// Creates a client against a custom base URL
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("release-watch")
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
            token,
        }
    }

    /// Creates a client against api.github.com
    pub fn with_token(token: Option<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, token)
    }
}

#[async_trait::async_trait]
impl ReleaseSource for GitHubReleases {
    async fn latest_release(&self, repo: &RepoId) -> Result<ReleaseInfo, ResolveError> {
        let url = format!("{}/repos/{}/releases/latest", self.base_url, repo);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ResolveError::NotFound(repo.to_string()));
        }

        // GitHub signals rate limiting with 403 as well as 429
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(ResolveError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(ResolveError::Status(status));
        }

        let release: LatestRelease = response.json().await.map_err(|e| {
            warn!("Failed to parse latest-release response for {}: {}", repo, e);
            ResolveError::InvalidResponse(e.to_string())
        })?;

        let Some(tag) = release.tag_name.filter(|t| !t.is_empty()) else {
            return Err(ResolveError::Incomplete("tag_name"));
        };
        let Some(download_url) = release.zipball_url.filter(|u| !u.is_empty()) else {
            return Err(ResolveError::Incomplete("zipball_url"));
        };

        Ok(ReleaseInfo {
            version: normalize_tag(&tag).to_string(),
            download_url,
        })
    }
}
