//! Output rendering for the `list` and `facets` commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! the rows, pager metadata and warnings.

use crate::filter::Facets;
use crate::models::{Listing, Warning};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::use_colors()
}

/// Show `file` relative to `base` when it lives underneath it.
fn display_path(file: &str, base: &Path) -> String {
    match pathdiff::diff_paths(file, base) {
        Some(rel) if !rel.starts_with("..") => rel.to_string_lossy().to_string(),
        _ => file.to_string(),
    }
}

/// Rewrite report/map paths in a warning relative to `base`.
pub fn relative_warning(w: &Warning, base: &Path) -> Warning {
    match w {
        Warning::FileParse { file, message } => Warning::FileParse {
            file: display_path(file, base),
            message: message.clone(),
        },
        Warning::MalformedEntry {
            file,
            category,
            filename,
            message,
        } => Warning::MalformedEntry {
            file: display_path(file, base),
            category: *category,
            filename: filename.clone(),
            message: message.clone(),
        },
        Warning::MapParse { file, message } => Warning::MapParse {
            file: display_path(file, base),
            message: message.clone(),
        },
        other => other.clone(),
    }
}

fn print_warnings(warnings: &[Warning], base: &Path) {
    for w in warnings {
        eprintln!(
            "{} {}",
            crate::utils::warn_prefix(),
            relative_warning(w, base)
        );
    }
}

/// Print a listing in the requested format. `base` is the reports
/// directory, used to shorten paths in warnings.
pub fn print_listing(listing: &Listing, output: &str, base: &Path) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_listing_json(listing)).unwrap()
        ),
        _ => {
            print_warnings(&listing.warnings, base);
            let color = use_colors(output);
            for row in &listing.page.rows {
                let level = match row.level.as_str() {
                    "error" => {
                        if color {
                            "⟦error⟧".red().bold().to_string()
                        } else {
                            "⟦error⟧".to_string()
                        }
                    }
                    "warning" | "warn" => {
                        if color {
                            "⟦warning⟧".yellow().bold().to_string()
                        } else {
                            "⟦warning⟧".to_string()
                        }
                    }
                    other => {
                        let tag = format!("⟦{}⟧", other);
                        if color {
                            tag.blue().bold().to_string()
                        } else {
                            tag
                        }
                    }
                };
                let label = if color {
                    row.label.clone().bold().to_string()
                } else {
                    row.label.clone()
                };
                let href = if row.href != row.label {
                    format!(" <{}>", row.href)
                } else {
                    String::new()
                };
                println!(
                    "{} {}{} ❲{}❳ — {}",
                    level, label, href, row.category, row.message
                );
            }
            let p = &listing.page;
            let pager = if p.page_count == 0 {
                "— Page 0 of 0 — records=0".to_string()
            } else {
                format!(
                    "— Page {} of {} — records={} per_page={}",
                    p.index + 1,
                    p.page_count,
                    p.total,
                    p.page_size
                )
            };
            if color {
                println!("{}", pager.bold());
            } else {
                println!("{}", pager);
            }
        }
    }
}

/// Print facet counts in the requested format.
pub fn print_facets(facets: &Facets, warnings: &[Warning], output: &str, base: &Path) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_facets_json(facets, warnings)).unwrap()
        ),
        _ => {
            print_warnings(warnings, base);
            let color = use_colors(output);
            let heading = |s: &str| {
                if color {
                    s.bold().to_string()
                } else {
                    s.to_string()
                }
            };
            println!("{}", heading("Types"));
            for (cat, n) in &facets.categories {
                println!("  {:<16} {}", cat.as_str(), n);
            }
            println!("{}", heading("Levels"));
            for (level, n) in &facets.levels {
                println!("  {:<16} {}", level, n);
            }
            println!("{}", heading(&format!("— Total — records={}", facets.total)));
        }
    }
}

/// A warning as JSON: its tagged fields plus the rendered `text`.
fn warning_json(w: &Warning) -> JsonVal {
    let mut v = serde_json::to_value(w).unwrap();
    v["text"] = JsonVal::String(w.to_string());
    v
}

/// Compose listing JSON object (pure) for testing/snapshot purposes.
pub fn compose_listing_json(listing: &Listing) -> JsonVal {
    let p = &listing.page;
    json!({
        "rows": p.rows,
        "pager": {
            "page": p.index,
            "per_page": p.page_size,
            "total": p.total,
            "pages": p.page_count,
        },
        "warnings": listing.warnings.iter().map(warning_json).collect::<Vec<_>>(),
    })
}

/// Compose facets JSON object (pure) for testing/snapshot purposes.
pub fn compose_facets_json(facets: &Facets, warnings: &[Warning]) -> JsonVal {
    json!({
        "types": facets.categories,
        "levels": facets.levels,
        "total": facets.total,
        "warnings": warnings.iter().map(warning_json).collect::<Vec<_>>(),
    })
}
