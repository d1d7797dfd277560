use anyhow::{bail, Result};

use super::Shares;
use crate::cfr::{AgencyRegistry, TitleStructure};

/// Share of `title` attributed to each agency, largest first.
///
/// Every direct child whose label contains an agency name contributes
/// `child.size / title.size` to that agency. Matching is plain substring
/// containment, so one child can count towards several agencies.
pub fn agency_breakdown(title: &TitleStructure, registry: &AgencyRegistry) -> Result<Shares<String>> {
    let mut shares = Shares::new();
    for child in &title.children {
        for agency in &registry.agencies {
            if !child.label.contains(agency.name.as_str()) {
                continue;
            }
            if title.size == 0.0 {
                bail!(
                    "title {} has zero size but child {:?} matches agency {:?}",
                    title.identifier,
                    child.label,
                    agency.name
                );
            }
            shares.add(agency.name.clone(), child.size / title.size);
        }
    }
    shares.sort_descending();
    Ok(shares)
}
