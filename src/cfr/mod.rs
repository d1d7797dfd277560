//! eCFR documents as fetched from the API, and loading them from disk.

pub mod load;
pub mod types;

pub use load::{load_corrections, load_json_dir, StructureSet, AGENCIES_FILE};
pub use types::{
    Agency, AgencyRegistry, CorrectionRecord, CorrectionsDocument, TitleChild, TitleNumber,
    TitleStructure,
};
