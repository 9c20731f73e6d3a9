//! Locate report files and the URL map inside the reports directory.
//!
//! Report files are named `<lowercase-alnum>-report.json`; the map is the
//! file named `map.json`. Both are looked up at any depth below the
//! directory. A missing directory is not an error: the listing is simply
//! empty.

use crate::error::{AuditError, Result};
use glob::{glob, Pattern};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const REPORT_FILE_PATTERN: &str = r"^[a-z0-9]+-report\.json$";
pub const MAP_FILE_NAME: &str = "map.json";

fn report_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REPORT_FILE_PATTERN).expect("valid report file pattern"))
}

/// Whether a bare file name looks like a report file.
pub fn is_report_file_name(name: &str) -> bool {
    report_name_re().is_match(name)
}

#[derive(Debug, Default)]
/// Files found in a reports directory.
pub struct Discovered {
    /// Report files, sorted by path.
    pub reports: Vec<PathBuf>,
    /// The shallowest `map.json`; ties go to the first path in order.
    pub map: Option<PathBuf>,
    /// False when the directory does not exist or is not a directory.
    pub available: bool,
}

/// Regular files (symlinks followed) under `dir` whose name matches `name_glob`.
fn find_files(dir: &Path, name_glob: &str) -> Result<Vec<PathBuf>> {
    let root = Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/**/{}", root, name_glob);
    let paths = glob(&pattern)
        .map_err(|e| AuditError::config(format!("bad glob pattern {}: {}", pattern, e)))?;
    let mut found = Vec::new();
    for entry in paths {
        match entry {
            Ok(p) if p.is_file() => found.push(p),
            Ok(_) => {}
            Err(e) => log::warn!("skipping {}: {}", e.path().display(), e.error()),
        }
    }
    found.sort();
    Ok(found)
}

/// Scan `dir` recursively for report files and `map.json`.
///
/// Only an existing directory that cannot be read is an error; unreadable
/// subdirectories are skipped with a log warning.
pub fn discover(dir: &Path) -> Result<Discovered> {
    if !dir.is_dir() {
        log::debug!("reports directory {} is not available", dir.display());
        return Ok(Discovered::default());
    }
    // Permission errors on the root itself are the caller's problem.
    fs::read_dir(dir)?;

    let reports: Vec<PathBuf> = find_files(dir, "*-report.json")?
        .into_iter()
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_report_file_name)
        })
        .collect();
    let map = find_files(dir, MAP_FILE_NAME)?
        .into_iter()
        .min_by_key(|p| p.components().count());

    log::debug!(
        "discovered {} report file(s) in {} (map: {})",
        reports.len(),
        dir.display(),
        map.is_some()
    );
    Ok(Discovered {
        reports,
        map,
        available: true,
    })
}
