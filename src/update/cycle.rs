//! One check cycle over every tracked plugin

use std::path::Path;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::info;

use crate::config::FETCH_STAGGER_DELAY_MS;
use crate::update::artifact::installed_version;
use crate::update::cache::ReleaseStore;
use crate::update::evaluator::evaluate;
use crate::update::resolver::ReleaseSource;
use crate::update::types::{TrackedPlugin, UpdateRecord};

/// Evaluate every tracked plugin once and collect the available updates.
///
/// Evaluations run in parallel with staggered start times to avoid rate
/// limiting. A plugin whose check fails contributes no record and never
/// blocks the others.
pub async fn run_cycle<S: ReleaseStore>(
    store: &S,
    source: &dyn ReleaseSource,
    plugins_dir: &Path,
    plugins: &[TrackedPlugin],
    ttl: Duration,
) -> Vec<UpdateRecord> {
    let checks = plugins.iter().enumerate().map(|(i, plugin)| {
        let delay = Duration::from_millis(FETCH_STAGGER_DELAY_MS * i as u64);
        async move {
            sleep(delay).await;
            let installed = installed_version(plugins_dir, &plugin.identifier);
            evaluate(store, source, plugin, installed.as_deref(), ttl).await
        }
    });

    let records: Vec<UpdateRecord> = join_all(checks).await.into_iter().flatten().collect();
    info!(
        "Checked {} plugins, {} updates available",
        plugins.len(),
        records.len()
    );
    records
}
