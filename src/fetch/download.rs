use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved(PathBuf),
    /// Anything but a 200. Nothing is written.
    Skipped(StatusCode),
}

/// GET `url` and, on a 200, write the body byte-for-byte to `dest`.
/// An existing file at `dest` is replaced. Transport errors are returned.
pub async fn download_document(client: &Client, url: &Url, dest: &Path) -> Result<FetchOutcome> {
    let resp = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {}", url))?;

    let status = resp.status();
    if status != StatusCode::OK {
        warn!(%url, %status, "Failed to download {}", dest.display());
        return Ok(FetchOutcome::Skipped(status));
    }

    let bytes = resp
        .bytes()
        .await
        .with_context(|| format!("reading body from {}", url))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {:?}", parent))?;
    }
    fs::write(dest, &bytes)
        .await
        .with_context(|| format!("writing {:?}", dest))?;
    debug!(path = %dest.display(), bytes = bytes.len(), "saved");

    Ok(FetchOutcome::Saved(dest.to_path_buf()))
}
