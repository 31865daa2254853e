//! Update checking layer
//!
//! Decides, for each tracked plugin, whether a newer GitHub release
//! exists and should be surfaced to the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Resolver   │────▶│    Cache    │◀────│  Evaluator  │
//! │  (fetch)    │     │ (time-boxed)│     │  (compare)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │ GitHub API  │                         │   semver    │
//! │ (releases)  │                         │ (precedence)│
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`artifact`]: Installed-version lookup from local plugin files
//! - [`cache`]: In-process release cache with per-entry expiry
//! - [`cycle`]: One evaluation pass over every tracked plugin
//! - [`error`]: Error types for resolve and cache operations
//! - [`evaluator`]: Cache-or-resolve plus version comparison per plugin
//! - [`resolver`]: GitHub Releases API client behind the source trait
//! - [`semver`]: Tag normalization and precedence comparison
//! - [`types`]: Common types like `RepoId` and `UpdateRecord`

pub mod artifact;
pub mod cache;
pub mod cycle;
pub mod error;
pub mod evaluator;
pub mod resolver;
pub mod semver;
pub mod types;
