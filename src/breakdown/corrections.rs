use std::collections::BTreeMap;

use crate::cfr::{CorrectionsDocument, TitleNumber};

/// title → year → number of corrections.
pub type CorrectionsBreakdown = BTreeMap<TitleNumber, BTreeMap<i32, u64>>;

/// Count correction records per (title, year) across all documents.
pub fn corrections_breakdown<'a, I>(documents: I) -> CorrectionsBreakdown
where
    I: IntoIterator<Item = &'a CorrectionsDocument>,
{
    let mut out = CorrectionsBreakdown::new();
    for doc in documents {
        for correction in &doc.ecfr_corrections {
            *out.entry(correction.title)
                .or_default()
                .entry(correction.year)
                .or_default() += 1;
        }
    }
    out
}
