//! release-watch: reports GitHub release updates for self-hosted plugins
//!
//! Given a configured map of locally installed plugins to GitHub
//! repositories, each check cycle resolves the latest release per
//! repository (with a time-boxed cache in between), compares it against
//! the installed version, and emits an update record for every plugin
//! that is behind.

pub mod config;
pub mod logging;
pub mod update;
