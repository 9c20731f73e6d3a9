//! Report parser: flattens `{category: {filename: [entry, ...]}}` files
//! into a sequence of [`ReportRecord`]s.
//!
//! A file that cannot be read or decoded contributes a warning and no
//! records; other files are unaffected. Within a file, entries whose
//! shape does not match their category are skipped individually.

use crate::error::{AuditError, Result};
use crate::models::report::RawEntry;
use crate::models::{Category, ReportRecord, Warning};
use rayon::prelude::*;
use serde_json::Value as Json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
/// Cooperative cancellation shared between a caller and a running listing.
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
/// Records and entry-level warnings extracted from one report file.
pub struct ParsedFile {
    pub records: Vec<ReportRecord>,
    pub warnings: Vec<Warning>,
}

/// Last path component of a filename key, which is what the map file uses.
fn base_name(key: &str) -> String {
    Path::new(key)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Decode one report body. Fails only when the body is not JSON or not an
/// object at the top level.
pub fn parse_report_str(source: &Path, body: &str) -> std::result::Result<ParsedFile, serde_json::Error> {
    let tree: Json = serde_json::from_str(body)?;
    let Json::Object(sections) = tree else {
        return Err(serde::de::Error::custom("top-level value is not an object"));
    };
    let source_name = source.to_string_lossy().to_string();
    let mut out = ParsedFile::default();
    for (key, section) in sections {
        let Some(category) = Category::from_key(&key) else {
            log::debug!("ignoring unknown category '{}' in {}", key, source_name);
            continue;
        };
        let Json::Object(files) = section else {
            out.warnings.push(Warning::MalformedEntry {
                file: source_name.clone(),
                category,
                filename: String::new(),
                message: "section is not an object".into(),
            });
            continue;
        };
        for (filename, entries) in files {
            let Json::Array(entries) = entries else {
                out.warnings.push(Warning::MalformedEntry {
                    file: source_name.clone(),
                    category,
                    filename,
                    message: "entries are not an array".into(),
                });
                continue;
            };
            let file = base_name(&filename);
            for entry in entries {
                match RawEntry::from_value(category, entry) {
                    Ok(raw) => out.records.push(raw.into_record(category, file.clone())),
                    Err(e) => out.warnings.push(Warning::MalformedEntry {
                        file: source_name.clone(),
                        category,
                        filename: filename.clone(),
                        message: e.to_string(),
                    }),
                }
            }
        }
    }
    Ok(out)
}

fn parse_report_file(path: &Path) -> ParsedFile {
    let file = path.to_string_lossy().to_string();
    let body = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("failed to read {}: {}", file, e);
            return ParsedFile {
                records: Vec::new(),
                warnings: vec![Warning::FileParse {
                    file,
                    message: e.to_string(),
                }],
            };
        }
    };
    match parse_report_str(path, &body) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("failed to parse {}: {}", file, e);
            ParsedFile {
                records: Vec::new(),
                warnings: vec![Warning::FileParse {
                    file,
                    message: e.to_string(),
                }],
            }
        }
    }
}

/// Parse every report file in parallel and concatenate the results in
/// the order of `paths`.
pub fn parse_reports(
    paths: &[PathBuf],
    cancel: Option<&CancelFlag>,
) -> Result<(Vec<ReportRecord>, Vec<Warning>)> {
    let per_file: Vec<Option<ParsedFile>> = paths
        .par_iter()
        .map(|path| {
            if cancel.is_some_and(|c| c.is_cancelled()) {
                return None;
            }
            Some(parse_report_file(path))
        })
        .collect();

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    for parsed in per_file {
        let Some(mut parsed) = parsed else {
            return Err(AuditError::Cancelled);
        };
        records.append(&mut parsed.records);
        warnings.append(&mut parsed.warnings);
    }
    if cancel.is_some_and(|c| c.is_cancelled()) {
        return Err(AuditError::Cancelled);
    }
    Ok((records, warnings))
}
