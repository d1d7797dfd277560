// src/config.rs

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::fetch::urls::{DocumentKind, ECFR_API_BASE};

/// File looked up in the working directory by both binaries.
pub const DEFAULT_SETTINGS_FILE: &str = "cfrstats.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fetch: FetchSettings,
    pub compile: CompileSettings,
}

/// Which eCFR documents to download, for which titles, and where to put them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub api_base: String,
    pub first_title: u32,
    /// Inclusive.
    pub last_title: u32,
    pub version_date: NaiveDate,
    pub output_root: PathBuf,
    pub documents: Vec<DocumentKind>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base: ECFR_API_BASE.to_string(),
            first_title: 1,
            last_title: 50,
            version_date: NaiveDate::from_ymd_opt(2025, 2, 6).expect("valid version date"),
            output_root: PathBuf::from("public_html"),
            documents: vec![DocumentKind::Corrections],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileSettings {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub structure_dir: PathBuf,
    pub corrections_dir: PathBuf,
    pub workforce_workbook: PathBuf,
    pub workforce_sheets: Vec<String>,
    /// Files with this extension are wiped from `target_dir` before rendering.
    pub clean_extension: String,
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src_html"),
            target_dir: PathBuf::from("public_html"),
            structure_dir: PathBuf::from("public_html/cfr_json"),
            corrections_dir: PathBuf::from("public_html/cfr_corrections_json"),
            // https://www.eeoc.gov/federal-sector/reports/annual-reports-federal-workforce-including-data-tables
            workforce_workbook: PathBuf::from(
                "FY 2021 Annual Report Workforce Tables 2023Dec12.xlsx",
            ),
            // from the workbook's table of contents
            workforce_sheets: vec!["A-1b".to_string(), "A-1d".to_string()],
            clean_extension: "html".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from a YAML file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading settings {:?}", path))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing settings {:?}", path))
    }

    /// Like [`Settings::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            info!(path = %path.display(), "loading settings");
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_published_layout() {
        let s = Settings::default();
        assert_eq!(s.fetch.first_title, 1);
        assert_eq!(s.fetch.last_title, 50);
        assert_eq!(s.fetch.version_date.to_string(), "2025-02-06");
        assert_eq!(s.fetch.documents, vec![DocumentKind::Corrections]);
        assert_eq!(s.compile.structure_dir, PathBuf::from("public_html/cfr_json"));
        assert_eq!(s.compile.workforce_sheets, vec!["A-1b", "A-1d"]);
    }

    #[test]
    fn partial_yaml_keeps_defaults() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(
            tmp,
            "fetch:\n  last_title: 3\n  documents: [structure, agencies]\ncompile:\n  source_dir: templates\n"
        )?;

        let s = Settings::load(tmp.path())?;
        assert_eq!(s.fetch.first_title, 1);
        assert_eq!(s.fetch.last_title, 3);
        assert_eq!(
            s.fetch.documents,
            vec![DocumentKind::Structure, DocumentKind::Agencies]
        );
        assert_eq!(s.compile.source_dir, PathBuf::from("templates"));
        assert_eq!(s.compile.target_dir, PathBuf::from("public_html"));
        Ok(())
    }

    #[test]
    fn missing_file_is_default() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let s = Settings::load_or_default(dir.path().join("nope.yaml"))?;
        assert_eq!(s, Settings::default());
        Ok(())
    }
}
