//! Sorting and fixed-size pagination.
//!
//! With [`SortScope::Page`] the sequence is chunked first and only the
//! requested chunk is ordered, which is how listings have always behaved.
//! [`SortScope::Global`] orders the full sequence before chunking.

use crate::models::{ReportRecord, SortDirection, SortScope, SortSelection, SORT_FIELDS};
use std::cmp::Ordering;

/// Number of pages needed for `total` records.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Stable byte-wise sort by the selected field, reversed for `desc`.
///
/// When the field is absent or not a record attribute every pair compares
/// equal, so only the `desc` reversal has an effect. Returns `false` in
/// that case.
pub fn sort_records(records: &mut [ReportRecord], sel: &SortSelection) -> bool {
    let field = sel.field.as_deref().unwrap_or("");
    let known = is_sort_field(field);
    if known {
        records.sort_by(|a, b| match (a.field(field), b.field(field)) {
            (Some(x), Some(y)) => x.as_bytes().cmp(y.as_bytes()),
            _ => Ordering::Equal,
        });
    }
    if sel.direction == SortDirection::Desc {
        records.reverse();
    }
    known
}

/// Whether `name` selects a record attribute.
pub fn is_sort_field(name: &str) -> bool {
    SORT_FIELDS.contains(&name)
}

#[derive(Debug, PartialEq, Eq)]
/// The requested chunk of a record sequence.
pub struct PageSlice {
    pub index: usize,
    pub total: usize,
    pub page_count: usize,
    pub records: Vec<ReportRecord>,
}

/// Chunk `records` into pages of `page_size` and return page `index`,
/// ordered per `sel` and `scope`. An out-of-range index yields no records.
pub fn paginate(
    mut records: Vec<ReportRecord>,
    sel: &SortSelection,
    scope: SortScope,
    index: usize,
    page_size: usize,
) -> PageSlice {
    let page_size = page_size.max(1);
    let total = records.len();
    let pages = page_count(total, page_size);
    if scope == SortScope::Global {
        sort_records(&mut records, sel);
    }
    let mut page: Vec<ReportRecord> = if index < pages {
        let start = index * page_size;
        let end = (start + page_size).min(total);
        records.drain(start..end).collect()
    } else {
        Vec::new()
    };
    if scope == SortScope::Page && !page.is_empty() {
        sort_records(&mut page, sel);
    }
    PageSlice {
        index,
        total,
        page_count: pages,
        records: page,
    }
}
