//! Auditor core library.
//!
//! This crate aggregates the JSON reports written by a site audit crawl
//! (accessibility, HTML5 validation and broken links) into a filterable,
//! sortable, paginated listing.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `discovery`: Locating `*-report.json` files and `map.json`.
//! - `parser`: Flattening report files into records.
//! - `resolver`: Replacing raw filenames with source URLs.
//! - `filter`: Type/level filtering and facet counts.
//! - `paginate`: Sorting and fixed-size pages.
//! - `listing`: The end-to-end listing pipeline.
//! - `models`: Records, selections, pages and warnings.
//! - `output`: Human/JSON printers.
//! - `error`: Hard failure type.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod listing;
pub mod models;
pub mod output;
pub mod paginate;
pub mod parser;
pub mod resolver;
pub mod utils;
