use anyhow::Result;
use cfrstats::{
    config::{Settings, DEFAULT_SETTINGS_FILE},
    fetch, logging,
};
use reqwest::Client;
use tokio::time::Instant;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    info!("startup");

    let settings = Settings::load_or_default(DEFAULT_SETTINGS_FILE)?;
    let client = Client::new();
    let start = Instant::now();

    let summary = fetch::fetch_titles(&client, &settings.fetch).await?;

    info!(
        saved = summary.saved,
        skipped = summary.skipped,
        elapsed = ?start.elapsed(),
        "all done"
    );
    Ok(())
}
