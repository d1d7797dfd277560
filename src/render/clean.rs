use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::{fs, path::Path};
use tracing::{error, info, instrument};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanSummary {
    pub deleted: usize,
    pub failed: usize,
}

/// Delete every `*.{extension}` file anywhere under `dir`. Failures are
/// logged and skipped.
#[instrument(level = "info", skip(dir), fields(dir = %dir.as_ref().display()))]
pub fn clean_files(dir: impl AsRef<Path>, extension: &str) -> Result<CleanSummary> {
    let pattern = format!(
        "{}/**/*.{}",
        Pattern::escape(&dir.as_ref().to_string_lossy()),
        Pattern::escape(extension)
    );

    let mut summary = CleanSummary::default();
    for entry in glob(&pattern).with_context(|| format!("bad glob pattern {}", pattern))? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                error!("Error scanning {}: {}", e.path().display(), e);
                summary.failed += 1;
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted: {}", path.display());
                summary.deleted += 1;
            }
            Err(e) => {
                error!("Error deleting {}: {}", path.display(), e);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}
