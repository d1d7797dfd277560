// src/fetch/mod.rs

use anyhow::Result;
use reqwest::Client;
use tracing::{info, instrument};

use crate::config::FetchSettings;

pub mod download;
pub mod urls;

pub use download::{download_document, FetchOutcome};
pub use urls::DocumentKind;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    pub saved: usize,
    pub skipped: usize,
}

impl FetchSummary {
    fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Saved(_) => self.saved += 1,
            FetchOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

async fn fetch_one(
    client: &Client,
    settings: &FetchSettings,
    kind: DocumentKind,
    title: u32,
) -> Result<FetchOutcome> {
    let file_name = kind.file_name(title);
    info!("Downloading {}", file_name);

    let url = kind.url(&settings.api_base, title, settings.version_date)?;
    let dest = settings.output_root.join(kind.subdir()).join(&file_name);
    download_document(client, &url, &dest).await
}

/// Download every configured document for every title in the inclusive
/// range, one request at a time. Non-200 responses are skipped; the first
/// transport error ends the run.
#[instrument(
    level = "info",
    skip(client, settings),
    fields(first = settings.first_title, last = settings.last_title)
)]
pub async fn fetch_titles(client: &Client, settings: &FetchSettings) -> Result<FetchSummary> {
    let mut summary = FetchSummary::default();

    for title in settings.first_title..=settings.last_title {
        for &kind in settings.documents.iter().filter(|k| k.is_per_title()) {
            let outcome = fetch_one(client, settings, kind, title).await?;
            summary.record(&outcome);
        }
    }

    if settings.documents.contains(&DocumentKind::Agencies) {
        let outcome = fetch_one(client, settings, DocumentKind::Agencies, 0).await?;
        summary.record(&outcome);
    }

    info!(saved = summary.saved, skipped = summary.skipped, "fetch finished");
    Ok(summary)
}
