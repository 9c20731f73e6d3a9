//! Typed shapes of raw report entries.
//!
//! Report files are decoded into a generic JSON tree first; each entry is
//! then converted into one of these structs according to its category so
//! that missing or mistyped fields are rejected rather than read loosely.

use super::{Category, ReportRecord};
use serde::Deserialize;
use serde_json::Value as Json;

#[derive(Debug, Deserialize)]
/// Entry shape shared by `accessibility` and `html5` sections.
pub struct FindingEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
/// Entry shape of the `link` section.
pub struct LinkEntry {
    pub error: String,
}

/// An entry validated against its category's shape.
pub enum RawEntry {
    Finding(FindingEntry),
    Link(LinkEntry),
}

impl RawEntry {
    /// Validate a decoded entry for the given category.
    pub fn from_value(category: Category, value: Json) -> Result<Self, serde_json::Error> {
        match category {
            Category::Accessibility | Category::Html5 => {
                serde_json::from_value(value).map(RawEntry::Finding)
            }
            Category::Link => serde_json::from_value(value).map(RawEntry::Link),
        }
    }

    /// Apply the fixed extraction rules to produce a record.
    pub fn into_record(self, category: Category, file: String) -> ReportRecord {
        match self {
            RawEntry::Finding(e) => ReportRecord {
                file,
                category,
                level: e.kind,
                message: e.message,
            },
            RawEntry::Link(e) => ReportRecord {
                file,
                category,
                level: "error".to_string(),
                message: e.error,
            },
        }
    }
}
