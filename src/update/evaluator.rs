//! Update evaluation for tracked plugins

use std::time::Duration;

use tracing::{debug, warn};

use crate::update::cache::ReleaseStore;
use crate::update::resolver::ReleaseSource;
use crate::update::semver::is_newer;
use crate::update::types::{ReleaseInfo, RepoId, TrackedPlugin, UpdateRecord};

/// Decide whether an update should be surfaced for one tracked plugin.
///
/// Consults the store first and falls back to the source on a miss,
/// caching a successful resolve for `ttl`. A resolver failure or an
/// unknown installed version yields `None`; a failed resolve never
/// writes to the cache. Given unchanged cache state and installed
/// version, repeated calls return the same answer.
pub async fn evaluate<S: ReleaseStore>(
    store: &S,
    source: &dyn ReleaseSource,
    plugin: &TrackedPlugin,
    installed_version: Option<&str>,
    ttl: Duration,
) -> Option<UpdateRecord> {
    let release = cached_or_resolved(store, source, &plugin.repo, ttl).await?;

    let Some(installed) = installed_version else {
        debug!(
            "Skipping {}: installed version unknown",
            plugin.identifier
        );
        return None;
    };

    if !is_newer(&release.version, installed) {
        debug!(
            "{} is up to date ({} installed, {} released)",
            plugin.identifier, installed, release.version
        );
        return None;
    }

    Some(UpdateRecord {
        plugin_identifier: plugin.identifier.clone(),
        new_version: release.version,
        source_url: plugin.repo.page_url(),
        package_url: release.download_url,
    })
}

/// Cache hit, or a fresh resolve that populates the cache on success
async fn cached_or_resolved<S: ReleaseStore>(
    store: &S,
    source: &dyn ReleaseSource,
    repo: &RepoId,
    ttl: Duration,
) -> Option<ReleaseInfo> {
    match store.get(repo) {
        Ok(Some(release)) => return Some(release),
        Ok(None) => {}
        Err(e) => warn!("Cache read failed for {}: {}", repo, e),
    }

    let release = match source.latest_release(repo).await {
        Ok(release) => release,
        Err(e) => {
            warn!("Release check failed for {}: {}", repo, e);
            return None;
        }
    };

    if let Err(e) = store.put(repo, release.clone(), ttl) {
        warn!("Failed to cache release for {}: {}", repo, e);
    }

    Some(release)
}
