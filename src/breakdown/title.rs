use anyhow::{bail, Result};
use std::collections::BTreeMap;
use tracing::debug;

use super::Shares;
use crate::cfr::{TitleNumber, TitleStructure};

/// Each title's share of the summed `size` of all titles, keyed by the
/// title's declared identifier and ordered largest first.
///
/// `titles` must not contain the agency registry. A zero total is an error.
pub fn title_breakdown(titles: &BTreeMap<String, TitleStructure>) -> Result<Shares<TitleNumber>> {
    let total: f64 = titles.values().map(|t| t.size).sum();
    if total == 0.0 {
        bail!(
            "total size across {} title documents is zero; cannot compute shares",
            titles.len()
        );
    }

    let mut shares = Shares::new();
    for (file, title) in titles {
        if let Some(prev) = shares.insert(title.identifier, title.size / total) {
            debug!(%file, title = %title.identifier, prev, "duplicate title identifier overwritten");
        }
    }
    shares.sort_descending();
    Ok(shares)
}
