//! Configuration discovery and effective settings resolution.
//!
//! Auditor reads `auditor.toml|yaml|yml` from the project root (or the
//! closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config.
//! Defaults:
//! - `reports`: `reports`
//! - `output`: `human`
//! - `page_size`: 25
//! - `sort_scope`: `page`
//! - `[filter].type|level`: unset (no filtering)
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{AuditError, Result};
use crate::models::{FilterSelection, SortScope, PAGE_SIZE};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILES: [&str; 3] = ["auditor.toml", "auditor.yaml", "auditor.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Default filter selection under `[filter]`.
pub struct FilterCfg {
    #[serde(default, rename = "type")]
    pub types: Vec<String>,
    #[serde(default, rename = "level")]
    pub levels: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `auditor.toml|yaml`.
pub struct AuditorConfig {
    pub reports: Option<String>,
    pub output: Option<String>,
    pub page_size: Option<usize>,
    pub sort_scope: Option<String>,
    #[serde(default)]
    pub filter: Option<FilterCfg>,
}

#[derive(Debug, Clone, Default)]
/// Settings the CLI can override.
pub struct Overrides<'a> {
    pub root: Option<&'a str>,
    pub reports: Option<&'a str>,
    pub output: Option<&'a str>,
    pub page_size: Option<usize>,
    pub global_sort: bool,
    pub types: &'a [String],
    pub levels: &'a [String],
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub reports_dir: PathBuf,
    pub output: String,
    pub page_size: usize,
    pub sort_scope: SortScope,
    pub filter: FilterSelection,
    pub config_found: bool,
}

/// Walk upward from `start` to detect the project root.
///
/// Stops when an `auditor.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `AuditorConfig` from `auditor.toml` or `auditor.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<AuditorConfig>> {
    let toml_path = root.join(CONFIG_FILES[0]);
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path)?;
        return Ok(Some(toml::from_str(&s)?));
    }
    for yml in &CONFIG_FILES[1..] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p)?;
            return Ok(Some(serde_yaml::from_str(&s)?));
        }
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(ov: &Overrides<'_>) -> Result<Effective> {
    let start = PathBuf::from(ov.root.unwrap_or("."));
    let root = detect_root(&start);
    let loaded = load_config(&root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let reports = ov
        .reports
        .map(|s| s.to_string())
        .or(cfg.reports)
        .unwrap_or_else(|| "reports".to_string());
    let reports_dir = root.join(reports);

    let output = ov
        .output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(AuditError::config(format!(
            "unknown output mode '{}' (expected human|json)",
            output
        )));
    }

    let page_size = ov.page_size.or(cfg.page_size).unwrap_or(PAGE_SIZE);
    if page_size == 0 {
        return Err(AuditError::config("page_size must be at least 1"));
    }

    let sort_scope = if ov.global_sort {
        SortScope::Global
    } else {
        match cfg.sort_scope.as_deref() {
            Some(s) => SortScope::parse(s).ok_or_else(|| {
                AuditError::config(format!("unknown sort_scope '{}' (expected page|global)", s))
            })?,
            None => SortScope::default(),
        }
    };

    // CLI lists replace the configured ones per dimension
    let cfg_filter = cfg.filter.unwrap_or_default();
    let types = if ov.types.is_empty() {
        cfg_filter.types.as_slice()
    } else {
        ov.types
    };
    let levels = if ov.levels.is_empty() {
        cfg_filter.levels.as_slice()
    } else {
        ov.levels
    };
    let filter = FilterSelection::from_lists(types, levels);

    Ok(Effective {
        root,
        reports_dir,
        output,
        page_size,
        sort_scope,
        filter,
        config_found,
    })
}
