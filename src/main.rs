use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use release_watch::config::{
    DEFAULT_CYCLE_INTERVAL_SECS, RELEASE_CACHE_TTL, WatchConfig,
};
use release_watch::update::cache::{ReleaseCache, ReleaseStore};
use release_watch::update::cycle::run_cycle;
use release_watch::update::resolver::GitHubReleases;
use release_watch::update::types::UpdateRecord;

#[derive(Parser)]
#[command(name = "release-watch")]
#[command(version, about = "Reports GitHub release updates for tracked plugins")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "release-watch.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one check cycle and print available updates as JSON
    Check,
    /// Check repeatedly, reloading the configuration between cycles
    Watch {
        /// Seconds between cycles
        #[arg(long, default_value_t = DEFAULT_CYCLE_INTERVAL_SECS)]
        interval: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = release_watch::logging::init()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Command::Check => runtime.block_on(run_check(&cli.config)),
        Command::Watch { interval } => {
            runtime.block_on(run_watch(&cli.config, Duration::from_secs(interval)))
        }
    }
}

async fn run_check(config_path: &Path) -> anyhow::Result<()> {
    let config = WatchConfig::load(config_path)?;
    let cache = ReleaseCache::new();

    let records = check_once(&cache, &config).await;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Watch mode: the cache persists across cycles, and a configuration
/// change clears it so the next cycle reflects the new settings
/// immediately.
async fn run_watch(config_path: &Path, interval: Duration) -> anyhow::Result<()> {
    let cache = ReleaseCache::new();
    let mut previous: Option<WatchConfig> = None;

    loop {
        match WatchConfig::load(config_path) {
            Ok(config) => {
                if previous.as_ref().is_some_and(|p| *p != config) {
                    info!("Configuration changed, invalidating cached releases");
                    if let Err(e) = cache.invalidate_all() {
                        error!("Failed to invalidate cache: {}", e);
                    }
                }

                let records = check_once(&cache, &config).await;
                if !records.is_empty() {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                }
                previous = Some(config);
            }
            Err(e) => error!("Failed to load config {:?}: {}", config_path, e),
        }

        tokio::time::sleep(interval).await;
    }
}

async fn check_once(cache: &ReleaseCache, config: &WatchConfig) -> Vec<UpdateRecord> {
    let source = GitHubReleases::with_token(config.access_token.clone());
    let plugins = config.tracked_plugins();
    run_cycle(
        cache,
        &source,
        &config.plugins_dir,
        &plugins,
        RELEASE_CACHE_TTL,
    )
    .await
}
