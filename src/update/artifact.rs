//! Installed plugin metadata

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

/// Number of leading lines scanned for the version header
const HEADER_SCAN_LINES: usize = 32;

/// Reads the installed version from a plugin artifact's header block.
///
/// Plugins declare their version as a `Version: x.y.z` line near the top
/// of the main artifact file, usually inside a comment block. Returns
/// `None` when the file, the header, or the value is missing; callers
/// skip the plugin for that cycle.
pub fn installed_version(plugins_dir: &Path, identifier: &str) -> Option<String> {
    let path = plugins_dir.join(identifier);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            debug!("Cannot open artifact {:?}: {}", path, e);
            return None;
        }
    };

    for line in BufReader::new(file).lines().take(HEADER_SCAN_LINES) {
        let line = line.ok()?;
        // Accept the header inside `*`, `//`, or `#` comment styles
        let stripped =
            line.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '/' | '#'));
        if let Some(value) = stripped.strip_prefix("Version:") {
            let version = value.trim();
            if !version.is_empty() {
                return Some(version.to_string());
            }
        }
    }

    debug!("No version header in {:?}", path);
    None
}
