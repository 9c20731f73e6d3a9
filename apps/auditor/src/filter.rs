//! Type/level filtering and the facet counts a filter form is built from.

use crate::models::{Category, FilterSelection, ReportRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Whether a record passes both inclusion sets.
pub fn matches(record: &ReportRecord, sel: &FilterSelection) -> bool {
    let type_ok = match sel.types.as_ref() {
        Some(types) if !types.is_empty() => types.contains(&record.category),
        _ => true,
    };
    let level_ok = match sel.levels.as_ref() {
        Some(levels) if !levels.is_empty() => levels.contains(&record.level),
        _ => true,
    };
    type_ok && level_ok
}

/// Keep the records matching `sel`, preserving order.
pub fn apply_filter(records: Vec<ReportRecord>, sel: &FilterSelection) -> Vec<ReportRecord> {
    records.into_iter().filter(|r| matches(r, sel)).collect()
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
/// Distinct categories and levels with their record counts.
pub struct Facets {
    pub categories: BTreeMap<Category, usize>,
    pub levels: BTreeMap<String, usize>,
    pub total: usize,
}

pub fn facets(records: &[ReportRecord]) -> Facets {
    let mut out = Facets::default();
    for r in records {
        *out.categories.entry(r.category).or_insert(0) += 1;
        *out.levels.entry(r.level.clone()).or_insert(0) += 1;
    }
    out.total = records.len();
    out
}
