use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("No release found for {0}")]
    NotFound(String),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Release is missing {0}")]
    Incomplete(&'static str),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Error)]
#[error("Invalid repository {0:?}: expected owner/name")]
pub struct InvalidRepoId(pub String);
