use anyhow::Result;
use cfrstats::{
    config::{Settings, DEFAULT_SETTINGS_FILE},
    logging, render,
};
use std::time::Instant;
use tracing::info;

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init();
    info!("startup");
    let start = Instant::now();

    // ─── 2) configure dirs ───────────────────────────────────────────
    let settings = Settings::load_or_default(DEFAULT_SETTINGS_FILE)?;
    let compile = &settings.compile;
    info!(
        source = %compile.source_dir.display(),
        target = %compile.target_dir.display(),
        "compiling"
    );

    // ─── 3) load, compute, clean, render ─────────────────────────────
    let summary = render::compile(compile)?;

    info!(
        files = summary.files,
        deleted = summary.cleaned.deleted,
        delete_failures = summary.cleaned.failed,
        elapsed = ?start.elapsed(),
        "all done"
    );
    Ok(())
}
