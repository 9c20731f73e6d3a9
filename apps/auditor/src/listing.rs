//! Listing runner: discovery, parsing, filtering, pagination and URL
//! resolution for one request.
//!
//! Nothing is cached between calls; every request re-reads the directory.
//! URLs are resolved after pagination and only for the returned page, so
//! sorting always operates on raw filenames.

use crate::discovery::discover;
use crate::error::Result;
use crate::filter::{apply_filter, facets, Facets};
use crate::models::{
    FilterSelection, Listing, Page, ReportRecord, SortScope, SortSelection, Warning, PAGE_SIZE,
};
use crate::paginate::{is_sort_field, paginate};
use crate::parser::{parse_reports, CancelFlag};
use crate::resolver::{load_url_map, resolve};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
/// Everything a listing needs from its caller.
pub struct ListingRequest {
    pub dir: PathBuf,
    pub filter: FilterSelection,
    pub sort: SortSelection,
    pub sort_scope: SortScope,
    pub page: usize,
    pub page_size: usize,
    pub cancel: Option<CancelFlag>,
}

impl ListingRequest {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            filter: FilterSelection::default(),
            sort: SortSelection::default(),
            sort_scope: SortScope::default(),
            page: 0,
            page_size: PAGE_SIZE,
            cancel: None,
        }
    }
}

/// Discover and parse every report in `dir`.
///
/// A missing directory yields no records and a `DirectoryUnavailable`
/// warning; only an unreadable existing directory is an error.
pub fn collect_records(
    dir: &Path,
    cancel: Option<&CancelFlag>,
) -> Result<(Vec<ReportRecord>, Vec<Warning>, Option<PathBuf>)> {
    let found = discover(dir)?;
    if !found.available {
        return Ok((
            Vec::new(),
            vec![Warning::DirectoryUnavailable {
                dir: dir.to_string_lossy().to_string(),
            }],
            None,
        ));
    }
    let (records, warnings) = parse_reports(&found.reports, cancel)?;
    Ok((records, warnings, found.map))
}

/// Build one page of the listing.
pub fn run_listing(req: &ListingRequest) -> Result<Listing> {
    let page_size = req.page_size.max(1);
    let (records, mut warnings, map_path) = collect_records(&req.dir, req.cancel.as_ref())?;

    let filtered = apply_filter(records, &req.filter);
    if let Some(field) = req.sort.field.as_deref() {
        if !field.is_empty() && !is_sort_field(field) {
            warnings.push(Warning::UnknownSortField {
                field: field.to_string(),
            });
        }
    }
    let slice = paginate(filtered, &req.sort, req.sort_scope, req.page, page_size);

    let mut rows = Vec::with_capacity(slice.records.len());
    if !slice.records.is_empty() {
        let (map, map_warning) = load_url_map(map_path.as_deref(), &req.dir);
        warnings.extend(map_warning);
        let mut missed: BTreeSet<String> = BTreeSet::new();
        for record in slice.records {
            let (row, miss) = resolve(record, &map);
            if let Some(Warning::MapLookupMiss { file }) = miss {
                missed.insert(file);
            }
            rows.push(row);
        }
        warnings.extend(missed.into_iter().map(|file| Warning::MapLookupMiss { file }));
    }
    log::debug!(
        "listing page {} of {} ({} of {} records)",
        slice.index,
        slice.page_count,
        rows.len(),
        slice.total
    );

    Ok(Listing {
        page: Page {
            index: slice.index,
            page_size,
            total: slice.total,
            page_count: slice.page_count,
            rows,
        },
        warnings,
    })
}

/// Facet counts over all (unfiltered) records in `dir`.
pub fn run_facets(dir: &Path, cancel: Option<&CancelFlag>) -> Result<(Facets, Vec<Warning>)> {
    let (records, warnings, _) = collect_records(dir, cancel)?;
    Ok((facets(&records), warnings))
}
