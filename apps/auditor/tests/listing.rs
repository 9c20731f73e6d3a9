use auditor::listing::{run_listing, ListingRequest};
use auditor::models::{Category, FilterSelection, SortDirection, SortSelection, Warning};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, name: &str, body: &str) {
    fs::write(root.join(name), body).unwrap();
}

#[test]
fn link_report_resolves_to_mapped_url() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "site-report.json", r#"{"link":{"a.html":[{"error":"404 not found"}]}}"#);
    write(root, "map.json", r#"{"a.html":"http://x/a.html"}"#);

    let listing = run_listing(&ListingRequest::new(root)).unwrap();
    assert_eq!(listing.page.total, 1);
    let row = &listing.page.rows[0];
    assert_eq!(row.category, Category::Link);
    assert_eq!(row.level, "error");
    assert_eq!(row.message, "404 not found");
    assert_eq!(row.label, "/a.html");
    assert_eq!(row.href, "http://x/a.html");
    assert!(listing.warnings.is_empty());
}

#[test]
fn second_page_of_thirty_records() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let entries: Vec<String> = (0..30)
        .map(|i| format!(r#"{{"type":"error","message":"m{:02}"}}"#, i))
        .collect();
    write(
        root,
        "big-report.json",
        &format!(r#"{{"html5":{{"a.html":[{}]}}}}"#, entries.join(",")),
    );
    write(root, "map.json", r#"{"a.html":"http://x/a.html"}"#);

    let mut req = ListingRequest::new(root);
    req.page = 1;
    let listing = run_listing(&req).unwrap();
    assert_eq!(listing.page.total, 30);
    assert_eq!(listing.page.page_count, 2);
    let messages: Vec<_> = listing.page.rows.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["m25", "m26", "m27", "m28", "m29"]);

    req.page = 5;
    let listing = run_listing(&req).unwrap();
    assert!(listing.page.rows.is_empty());
    assert_eq!(listing.page.total, 30);
}

#[test]
fn type_filter_keeps_only_links_in_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "mixed-report.json",
        r#"{
            "accessibility": {"a.html": [{"type": "error", "message": "a1"}]},
            "link": {"b.html": [{"error": "l1"}, {"error": "l2"}]},
            "assessibility": {"c.html": [{"type": "notice", "message": "a2"}]}
        }"#,
    );
    write(root, "more-report.json", r#"{"link": {"d.html": [{"error": "l3"}]}}"#);
    write(
        root,
        "map.json",
        r#"{"a.html":"http://x/a","b.html":"http://x/b","c.html":"http://x/c","d.html":"http://x/d"}"#,
    );

    let mut req = ListingRequest::new(root);
    req.filter = FilterSelection {
        types: Some(BTreeSet::from([Category::Link])),
        levels: None,
    };
    let listing = run_listing(&req).unwrap();
    let messages: Vec<_> = listing.page.rows.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["l1", "l2", "l3"]);
    assert_eq!(listing.page.total, 3);
}

#[test]
fn malformed_report_does_not_hide_others() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a-report.json", r#"{"link":{"a.html":[{"error":"one"}]}}"#);
    write(root, "b-report.json", r#"{"link":{"b.html":[{"error":"#);
    write(root, "c-report.json", r#"{"html5":{"c.html":[{"type":"info","message":"two"}]}}"#);
    write(root, "map.json", r#"{"a.html":"http://x/a.html","c.html":"http://x/c.html"}"#);

    let listing = run_listing(&ListingRequest::new(root)).unwrap();
    assert_eq!(listing.page.total, 2);
    let messages: Vec<_> = listing.page.rows.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["one", "two"]);
    assert_eq!(listing.warnings.len(), 1);
    assert!(matches!(&listing.warnings[0], Warning::FileParse { file, .. } if file.ends_with("b-report.json")));
}

#[test]
fn unmapped_file_keeps_raw_filename() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a-report.json", r#"{"link":{"lost.html":[{"error":"gone"}]}}"#);
    write(root, "map.json", r#"{"other.html":"http://x/other.html"}"#);

    let listing = run_listing(&ListingRequest::new(root)).unwrap();
    assert_eq!(listing.page.rows.len(), 1);
    let row = &listing.page.rows[0];
    assert_eq!(row.label, "lost.html");
    assert_eq!(row.href, "lost.html");
    assert_eq!(
        listing.warnings,
        vec![Warning::MapLookupMiss {
            file: "lost.html".into()
        }]
    );
}

#[test]
fn unknown_categories_and_missing_map() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a-report.json", r#"{"foo":{"a.html":[{"type":"x","message":"y"}]}}"#);
    write(root, "b-report.json", r#"{"html5":{"b.html":[{"type":"error","message":"z"}]}}"#);

    let listing = run_listing(&ListingRequest::new(root)).unwrap();
    assert_eq!(listing.page.total, 1);
    assert_eq!(listing.page.rows[0].label, "b.html");
    assert!(listing
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::MapUnavailable { .. })));
}

#[test]
fn total_is_independent_of_page_and_sort() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let files: Vec<String> = (0..40)
        .map(|i| format!(r#""p{:02}.html":[{{"error":"e{}"}}]"#, 39 - i, i))
        .collect();
    write(root, "s-report.json", &format!(r#"{{"link":{{{}}}}}"#, files.join(",")));

    let mut seen = Vec::new();
    for page in 0..3 {
        let mut req = ListingRequest::new(root);
        req.page = page;
        req.sort = SortSelection {
            field: Some("file".into()),
            direction: SortDirection::Desc,
        };
        let listing = run_listing(&req).unwrap();
        assert_eq!(listing.page.total, 40);
        seen.extend(listing.page.rows.into_iter().map(|r| r.message));
    }
    assert_eq!(seen.len(), 40);
    let unique: BTreeSet<_> = seen.iter().collect();
    assert_eq!(unique.len(), 40);
}
