// src/render/mod.rs

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{debug, info, instrument};

use crate::breakdown::{
    agency_breakdown, corrections_breakdown, load_workforce, title_breakdown,
    CorrectionsBreakdown, Shares, WorkforceBreakdown,
};
use crate::cfr::{load_corrections, CorrectionsDocument, StructureSet, TitleNumber};
use crate::config::CompileSettings;

pub mod clean;
pub mod template;

pub use clean::{clean_files, CleanSummary};
pub use template::{script_tag, substitute, title_fragment, title_token};

/// Agency shares within one title, with the label it is rendered under.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleAgencies {
    pub identifier: TitleNumber,
    pub label: String,
    pub agencies: Shares<String>,
}

/// Everything the templates get, computed once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdowns {
    pub titles: Shares<TitleNumber>,
    pub corrections: CorrectionsBreakdown,
    pub workforce: WorkforceBreakdown,
    /// In structure file name order.
    pub title_agencies: Vec<TitleAgencies>,
}

impl Breakdowns {
    pub fn compute(
        structures: &StructureSet,
        corrections: &BTreeMap<String, CorrectionsDocument>,
        workforce: WorkforceBreakdown,
    ) -> Result<Self> {
        let titles = title_breakdown(&structures.titles)?;
        let corrections = corrections_breakdown(corrections.values());

        let title_agencies = structures
            .titles
            .iter()
            .map(|(file, title)| {
                let agencies = agency_breakdown(title, &structures.agencies)
                    .with_context(|| format!("agency breakdown for {}", file))?;
                Ok(TitleAgencies {
                    identifier: title.identifier,
                    label: title.label.clone(),
                    agencies,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            titles,
            corrections,
            workforce,
            title_agencies,
        })
    }

    /// `(token, replacement)` pairs in the order they are applied.
    pub fn replacements(&self) -> Result<Vec<(String, String)>> {
        let mut out = vec![
            (
                template::TITLE_BREAKDOWN_TOKEN.to_string(),
                script_tag("title_breakdown_json", &self.titles)?,
            ),
            (
                template::CORRECTIONS_BREAKDOWN_TOKEN.to_string(),
                script_tag("corrections_breakdown_json", &self.corrections)?,
            ),
            (
                template::WORKFORCE_BREAKDOWN_TOKEN.to_string(),
                script_tag("workforce_breakdown_json", &self.workforce)?,
            ),
        ];
        for t in &self.title_agencies {
            out.push((title_token(t.identifier), title_fragment(&t.label, &t.agencies)));
        }
        Ok(out)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub files: usize,
    pub cleaned: CleanSummary,
}

/// Substitute every file under `source` and write it to the same relative
/// path under `target`.
#[instrument(level = "info", skip_all, fields(source = %source.display(), target = %target.display()))]
pub fn render_tree(
    source: &Path,
    target: &Path,
    replacements: &[(String, String)],
) -> Result<usize> {
    fs::create_dir_all(target).with_context(|| format!("creating {:?}", target))?;

    let pattern = format!("{}/**/*", Pattern::escape(&source.to_string_lossy()));
    let mut files = 0;
    for entry in glob(&pattern).with_context(|| format!("bad glob pattern {}", pattern))? {
        let source_path = entry.with_context(|| format!("scanning {:?}", source))?;
        if !source_path.is_file() {
            continue;
        }
        let relative = source_path
            .strip_prefix(source)
            .with_context(|| format!("{:?} is outside {:?}", source_path, source))?;
        let target_path = target.join(relative);

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
        }

        let content = fs::read_to_string(&source_path)
            .with_context(|| format!("reading {:?}", source_path))?;
        let rendered = substitute(&content, replacements);

        let leftover = template::leftover_tokens(&rendered);
        if !leftover.is_empty() {
            debug!(file = %relative.display(), tokens = ?leftover, "unreplaced tokens");
        }

        fs::write(&target_path, rendered)
            .with_context(|| format!("writing {:?}", target_path))?;
        debug!(file = %relative.display(), "rendered");
        files += 1;
    }
    Ok(files)
}

/// The whole compile step: load inputs, compute breakdowns, wipe old
/// output, render the source tree.
#[instrument(level = "info", skip_all)]
pub fn compile(settings: &CompileSettings) -> Result<RenderSummary> {
    let structures = StructureSet::load(&settings.structure_dir)?;
    let corrections = load_corrections(&settings.corrections_dir)?;
    let workforce = load_workforce(&settings.workforce_workbook, &settings.workforce_sheets)?;

    let breakdowns = Breakdowns::compute(&structures, &corrections, workforce)?;
    let replacements = breakdowns.replacements()?;
    info!(
        titles = breakdowns.titles.len(),
        corrected_titles = breakdowns.corrections.len(),
        agencies = breakdowns.workforce.len(),
        "breakdowns computed"
    );

    let cleaned = clean_files(&settings.target_dir, &settings.clean_extension)?;
    let files = render_tree(&settings.source_dir, &settings.target_dir, &replacements)?;
    info!(files, deleted = cleaned.deleted, "render finished");

    Ok(RenderSummary { files, cleaned })
}
