// src/fetch/urls.rs

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

/// Public eCFR API root. Every endpoint below is relative to it.
pub const ECFR_API_BASE: &str = "https://www.ecfr.gov/api/";

/// The eCFR documents we know how to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Full versioned XML text of a title.
    Full,
    /// Versioned JSON structure (hierarchy + sizes) of a title.
    Structure,
    /// Correction records for a title.
    Corrections,
    /// The agency registry. Not per title.
    Agencies,
}

impl DocumentKind {
    pub fn is_per_title(self) -> bool {
        !matches!(self, DocumentKind::Agencies)
    }

    fn endpoint(self, title: u32, version_date: NaiveDate) -> String {
        let date = version_date.format("%Y-%m-%d");
        match self {
            DocumentKind::Full => format!("versioner/v1/full/{}/title-{}.xml", date, title),
            DocumentKind::Structure => {
                format!("versioner/v1/structure/{}/title-{}.json", date, title)
            }
            DocumentKind::Corrections => format!("admin/v1/corrections/title/{}.json", title),
            DocumentKind::Agencies => "admin/v1/agencies.json".to_string(),
        }
    }

    /// Resolve the endpoint for `title` against `api_base`.
    pub fn url(self, api_base: &str, title: u32, version_date: NaiveDate) -> Result<Url> {
        let base = Url::parse(api_base).with_context(|| format!("parsing API base {}", api_base))?;
        let endpoint = self.endpoint(title, version_date);
        base.join(&endpoint)
            .with_context(|| format!("joining {} onto {}", endpoint, base))
    }

    /// Directory (under the output root) the document is saved in.
    pub fn subdir(self) -> &'static str {
        match self {
            DocumentKind::Full => "cfr",
            DocumentKind::Structure | DocumentKind::Agencies => "cfr_json",
            DocumentKind::Corrections => "cfr_corrections_json",
        }
    }

    pub fn file_name(self, title: u32) -> String {
        match self {
            DocumentKind::Full => format!("title-{}.xml", title),
            DocumentKind::Structure => format!("title-{}.json", title),
            DocumentKind::Corrections => format!("corrections-{}.json", title),
            DocumentKind::Agencies => "agencies.json".to_string(),
        }
    }
}
