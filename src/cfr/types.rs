// src/cfr/types.rs

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// A CFR title number. The structure API sends it as a string, the
/// corrections API as an integer; both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TitleNumber(pub u32);

impl fmt::Display for TitleNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for TitleNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(TitleNumber(n)),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map(TitleNumber)
                .map_err(|_| de::Error::custom(format!("invalid title number {:?}", s))),
        }
    }
}

/// Top of a title's structure document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TitleStructure {
    pub identifier: TitleNumber,
    pub label: String,
    pub size: f64,
    #[serde(default)]
    pub children: Vec<TitleChild>,
}

/// A direct child (chapter) of a title. Reserved chapters carry no size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TitleChild {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub size: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgencyRegistry {
    pub agencies: Vec<Agency>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Agency {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CorrectionsDocument {
    pub ecfr_corrections: Vec<CorrectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorrectionRecord {
    pub title: TitleNumber,
    pub year: i32,
}
