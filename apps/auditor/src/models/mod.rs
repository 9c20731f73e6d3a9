//! Shared data models for the report listing: records, selections,
//! display rows, pages and non-fatal warnings.

pub mod report;

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Number of records shown per page unless configured otherwise.
pub const PAGE_SIZE: usize = 25;

/// Attribute names accepted by [`ReportRecord::field`].
pub const SORT_FIELDS: [&str; 5] = ["file", "category", "type", "level", "message"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Closed set of report kinds emitted by the audit tool.
pub enum Category {
    Accessibility,
    Html5,
    Link,
}

impl Category {
    /// Map a top-level report key to a category.
    ///
    /// The audit tool has historically spelled the accessibility section
    /// `assessibility`; both spellings are accepted. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "accessibility" | "assessibility" => Some(Category::Accessibility),
            "html5" => Some(Category::Html5),
            "link" => Some(Category::Link),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Accessibility => "accessibility",
            Category::Html5 => "html5",
            Category::Link => "link",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single normalized finding.
pub struct ReportRecord {
    pub file: String,
    pub category: Category,
    pub level: String,
    pub message: String,
}

impl ReportRecord {
    /// Value of a sortable attribute by name. `type` is accepted for
    /// `category` since that is what the report calls it.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "file" => Some(&self.file),
            "category" | "type" => Some(self.category.as_str()),
            "level" => Some(&self.level),
            "message" => Some(&self.message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Caller-supplied inclusion sets. `None` or an empty set disables
/// filtering on that dimension.
pub struct FilterSelection {
    pub types: Option<BTreeSet<Category>>,
    pub levels: Option<BTreeSet<String>>,
}

impl FilterSelection {
    /// Build a selection from raw string lists, as collected by a form or CLI.
    /// Type names that are not a known category are dropped.
    pub fn from_lists(types: &[String], levels: &[String]) -> Self {
        let types: BTreeSet<Category> = types.iter().filter_map(|t| Category::from_key(t)).collect();
        let levels: BTreeSet<String> = levels.iter().cloned().collect();
        FilterSelection {
            types: if types.is_empty() { None } else { Some(types) },
            levels: if levels.is_empty() { None } else { Some(levels) },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than `desc` sorts ascending.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Requested ordering: a record attribute name and a direction.
pub struct SortSelection {
    pub field: Option<String>,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Whether ordering applies to the requested page only or to the whole
/// filtered sequence before it is chunked.
pub enum SortScope {
    #[default]
    Page,
    Global,
}

impl SortScope {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "page" => Some(SortScope::Page),
            "global" => Some(SortScope::Global),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A record ready for display: `label` and `href` replace the raw file.
pub struct DisplayRow {
    pub label: String,
    pub href: String,
    pub category: Category,
    pub level: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One page of the listing plus what a pager needs.
pub struct Page {
    pub index: usize,
    pub page_size: usize,
    pub total: usize,
    pub page_count: usize,
    pub rows: Vec<DisplayRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Recoverable conditions met while building a listing.
pub enum Warning {
    DirectoryUnavailable {
        dir: String,
    },
    FileParse {
        file: String,
        message: String,
    },
    MalformedEntry {
        file: String,
        category: Category,
        filename: String,
        message: String,
    },
    MapUnavailable {
        dir: String,
    },
    MapParse {
        file: String,
        message: String,
    },
    MapLookupMiss {
        file: String,
    },
    UnknownSortField {
        field: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DirectoryUnavailable { dir } => {
                write!(f, "reports directory not available: {}", dir)
            }
            Warning::FileParse { file, message } => {
                write!(f, "skipped report {}: {}", file, message)
            }
            Warning::MalformedEntry {
                file,
                category,
                filename,
                message,
            } => write!(
                f,
                "skipped {} entry for {} in {}: {}",
                category, filename, file, message
            ),
            Warning::MapUnavailable { dir } => write!(f, "no map.json found in {}", dir),
            Warning::MapParse { file, message } => {
                write!(f, "map file {} is not usable: {}", file, message)
            }
            Warning::MapLookupMiss { file } => write!(f, "no URL mapped for {}", file),
            Warning::UnknownSortField { field } => {
                write!(f, "unknown sort field '{}' ignored", field)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Result of one listing request.
pub struct Listing {
    pub page: Page,
    pub warnings: Vec<Warning>,
}
