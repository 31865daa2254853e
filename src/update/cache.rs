//! In-process cache of resolved releases
//!
//! One entry per repository, overwritten on each successful resolve.
//! Expired entries read as misses; the resolve cadence is therefore
//! governed entirely by the TTL handed to [`ReleaseStore::put`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[cfg(test)]
use mockall::automock;

use tracing::debug;

use crate::update::error::CacheError;
use crate::update::types::{ReleaseInfo, RepoId};

/// Store for resolved releases with per-entry expiry
#[cfg_attr(test, automock)]
pub trait ReleaseStore: Send + Sync {
    /// Returns the cached release for a repository, if still fresh
    fn get(&self, repo: &RepoId) -> Result<Option<ReleaseInfo>, CacheError>;

    /// Caches a resolved release for `ttl`, replacing any previous entry
    fn put(&self, repo: &RepoId, release: ReleaseInfo, ttl: Duration) -> Result<(), CacheError>;

    /// Discards every entry, fresh or not
    fn invalidate_all(&self) -> Result<(), CacheError>;
}

struct Entry {
    value: ReleaseInfo,
    expires_at: Instant,
}

/// Mutex-guarded map shared by all evaluations within a process
pub struct ReleaseCache {
    entries: Mutex<HashMap<RepoId, Entry>>,
}

impl ReleaseCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the map lock with proper error handling
    fn lock_entries(&self) -> Result<MutexGuard<'_, HashMap<RepoId, Entry>>, CacheError> {
        self.entries.lock().map_err(|_| CacheError::LockPoisoned)
    }
}

impl Default for ReleaseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseStore for ReleaseCache {
    fn get(&self, repo: &RepoId) -> Result<Option<ReleaseInfo>, CacheError> {
        let mut entries = self.lock_entries()?;
        match entries.get(repo) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                // Expired; drop the entry so the slot reads as a miss
                entries.remove(repo);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn put(&self, repo: &RepoId, release: ReleaseInfo, ttl: Duration) -> Result<(), CacheError> {
        debug!("Caching release {} for {}", release.version, repo);
        let mut entries = self.lock_entries()?;
        entries.insert(
            repo.clone(),
            Entry {
                value: release,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    fn invalidate_all(&self) -> Result<(), CacheError> {
        let mut entries = self.lock_entries()?;
        debug!("Invalidating {} cached releases", entries.len());
        entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(s: &str) -> RepoId {
        s.parse().unwrap()
    }

    fn release(version: &str) -> ReleaseInfo {
        ReleaseInfo {
            version: version.to_string(),
            download_url: format!("https://example/{version}.zip"),
        }
    }

    #[test]
    fn get_returns_fresh_entry() {
        let cache = ReleaseCache::new();
        cache
            .put(&repo("acme/widget"), release("1.3.0"), Duration::from_secs(60))
            .unwrap();

        let cached = cache.get(&repo("acme/widget")).unwrap();
        assert_eq!(cached, Some(release("1.3.0")));
    }

    #[test]
    fn get_returns_none_for_unknown_repo() {
        let cache = ReleaseCache::new();
        assert_eq!(cache.get(&repo("acme/widget")).unwrap(), None);
    }

    #[test]
    fn get_treats_expired_entry_as_miss() {
        let cache = ReleaseCache::new();
        cache
            .put(&repo("acme/widget"), release("1.3.0"), Duration::from_millis(50))
            .unwrap();

        std::thread::sleep(Duration::from_millis(80));

        assert_eq!(cache.get(&repo("acme/widget")).unwrap(), None);
    }

    #[test]
    fn put_overwrites_previous_entry() {
        let cache = ReleaseCache::new();
        cache
            .put(&repo("acme/widget"), release("1.3.0"), Duration::from_secs(60))
            .unwrap();
        cache
            .put(&repo("acme/widget"), release("1.4.0"), Duration::from_secs(60))
            .unwrap();

        assert_eq!(cache.get(&repo("acme/widget")).unwrap(), Some(release("1.4.0")));
    }

    #[test]
    fn entries_are_independent_per_repo() {
        let cache = ReleaseCache::new();
        cache
            .put(&repo("acme/widget"), release("1.0.0"), Duration::from_secs(60))
            .unwrap();
        cache
            .put(&repo("acme/gadget"), release("2.0.0"), Duration::from_secs(60))
            .unwrap();

        assert_eq!(cache.get(&repo("acme/widget")).unwrap(), Some(release("1.0.0")));
        assert_eq!(cache.get(&repo("acme/gadget")).unwrap(), Some(release("2.0.0")));
    }

    #[test]
    fn invalidate_all_discards_fresh_entries() {
        let cache = ReleaseCache::new();
        cache
            .put(&repo("acme/widget"), release("1.3.0"), Duration::from_secs(3600))
            .unwrap();

        cache.invalidate_all().unwrap();

        assert_eq!(cache.get(&repo("acme/widget")).unwrap(), None);
    }
}
