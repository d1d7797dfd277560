// src/cfr/load.rs

use anyhow::{anyhow, bail, Context, Result};
use glob::{glob, Pattern};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{debug, info, instrument};

use super::types::{AgencyRegistry, CorrectionsDocument, TitleStructure};

/// Name of the agency registry inside the structure directory. It is not a
/// title and is left out of every title computation.
pub const AGENCIES_FILE: &str = "agencies.json";

/// Parse every `*.json` file directly under `dir`, keyed by file name.
/// Any unreadable or malformed file fails the whole load.
pub fn load_json_dir<T: DeserializeOwned>(dir: impl AsRef<Path>) -> Result<BTreeMap<String, T>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("{:?} is not a directory", dir);
    }
    let pattern = format!("{}/*.json", Pattern::escape(&dir.to_string_lossy()));

    let mut out = BTreeMap::new();
    for entry in glob(&pattern).with_context(|| format!("bad glob pattern {}", pattern))? {
        let path = entry.with_context(|| format!("scanning {:?}", dir))?;
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };

        let text = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
        let doc = serde_json::from_str(&text).with_context(|| format!("parsing {:?}", path))?;
        debug!(file = %name, "loaded");
        out.insert(name, doc);
    }
    Ok(out)
}

/// Title structure documents plus the agency registry that sits beside them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureSet {
    /// Keyed by file name.
    pub titles: BTreeMap<String, TitleStructure>,
    pub agencies: AgencyRegistry,
}

impl StructureSet {
    #[instrument(level = "info", skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let set = Self::from_documents(load_json_dir(dir)?)?;
        info!(
            titles = set.titles.len(),
            agencies = set.agencies.agencies.len(),
            "structures loaded"
        );
        Ok(set)
    }

    pub fn from_documents(mut docs: BTreeMap<String, Value>) -> Result<Self> {
        let agencies = docs
            .remove(AGENCIES_FILE)
            .ok_or_else(|| anyhow!("{} not found among structure documents", AGENCIES_FILE))?;
        let agencies: AgencyRegistry =
            serde_json::from_value(agencies).with_context(|| format!("parsing {}", AGENCIES_FILE))?;

        let titles = docs
            .into_iter()
            .map(|(name, doc)| {
                let title: TitleStructure = serde_json::from_value(doc)
                    .with_context(|| format!("parsing title structure {}", name))?;
                Ok((name, title))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self { titles, agencies })
    }
}

#[instrument(level = "info", skip(dir), fields(dir = %dir.as_ref().display()))]
pub fn load_corrections(dir: impl AsRef<Path>) -> Result<BTreeMap<String, CorrectionsDocument>> {
    let docs: BTreeMap<String, CorrectionsDocument> = load_json_dir(dir)?;
    info!(documents = docs.len(), "corrections loaded");
    Ok(docs)
}
