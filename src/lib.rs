pub mod config;
pub mod log;
pub mod providers;
pub mod rate_provider;
pub mod report;
pub mod ui;

use anyhow::Result;
use chrono::Local;
use tracing::{debug, info};

/// Largest number of days back the archive endpoint is queried for.
pub const MAX_DAYS: u32 = 10;

pub async fn run(days: u32, config_path: Option<&str>) -> Result<()> {
    info!("Exchange rate archive starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    if days > MAX_DAYS {
        println!("You can request rates for up to 10 days only.");
        return Ok(());
    }

    let base_url = config
        .provider
        .as_ref()
        .map_or(providers::privatbank::DEFAULT_BASE_URL, |p| &p.base_url);
    let provider = providers::privatbank::PrivatBankProvider::new(base_url);

    let today = Local::now().date_naive();
    report::generate_and_display_reports(&provider, today, days, &config.currencies).await
}
