//! URL resolution: swaps a record's raw filename for the source URL the
//! crawler recorded in `map.json`.

use crate::models::{DisplayRow, ReportRecord, Warning};
use percent_encoding::percent_decode_str;
use serde_json::Value as Json;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use url::Url;

/// Raw filename -> absolute source URL.
pub type UrlMap = HashMap<String, String>;

/// Load the map file. Any problem yields an empty map plus a warning, so
/// every lookup falls back to the raw filename.
pub fn load_url_map(path: Option<&Path>, dir: &Path) -> (UrlMap, Option<Warning>) {
    let Some(path) = path else {
        return (
            UrlMap::new(),
            Some(Warning::MapUnavailable {
                dir: dir.to_string_lossy().to_string(),
            }),
        );
    };
    let file = path.to_string_lossy().to_string();
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str::<Json>(&s).map_err(|e| e.to_string()));
    match parsed {
        Ok(Json::Object(obj)) => {
            let map = obj
                .into_iter()
                .filter_map(|(k, v)| match v {
                    Json::String(u) => Some((k, u)),
                    _ => None,
                })
                .collect();
            (map, None)
        }
        Ok(_) => (
            UrlMap::new(),
            Some(Warning::MapParse {
                file,
                message: "top-level value is not an object".into(),
            }),
        ),
        Err(message) => {
            log::warn!("map file {} is not usable: {}", file, message);
            (UrlMap::new(), Some(Warning::MapParse { file, message }))
        }
    }
}

/// Label shown for a mapped URL: its path component, decoded back from
/// the percent-encoding `Url` applies. Unparseable values are shown as-is.
fn url_label(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(u) => percent_decode_str(u.path()).decode_utf8_lossy().into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// Turn a record into a display row. Unmapped files keep the raw filename
/// as both label and link target.
pub fn resolve(record: ReportRecord, map: &UrlMap) -> (DisplayRow, Option<Warning>) {
    let (label, href, miss) = match map.get(&record.file) {
        Some(uri) => (url_label(uri), uri.clone(), None),
        None => (
            record.file.clone(),
            record.file.clone(),
            Some(Warning::MapLookupMiss {
                file: record.file.clone(),
            }),
        ),
    };
    (
        DisplayRow {
            label,
            href,
            category: record.category,
            level: record.level,
            message: record.message,
        },
        miss,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use tempfile::tempdir;

    fn record(file: &str) -> ReportRecord {
        ReportRecord {
            file: file.into(),
            category: Category::Link,
            level: "error".into(),
            message: "404 not found".into(),
        }
    }

    #[test]
    fn test_resolve_uses_url_path_as_label() {
        let mut map = UrlMap::new();
        map.insert("a.html".into(), "http://x/a.html".into());
        map.insert("root.html".into(), "https://example.org".into());
        let (row, warn) = resolve(record("a.html"), &map);
        assert_eq!(row.label, "/a.html");
        assert_eq!(row.href, "http://x/a.html");
        assert!(warn.is_none());
        let (row, _) = resolve(record("root.html"), &map);
        assert_eq!(row.label, "/");
    }

    #[test]
    fn test_resolve_label_keeps_path_as_written() {
        let mut map = UrlMap::new();
        map.insert("cafe.html".into(), "http://x/café page.html?q=1".into());
        let (row, warn) = resolve(record("cafe.html"), &map);
        assert_eq!(row.label, "/café page.html");
        assert_eq!(row.href, "http://x/café page.html?q=1");
        assert!(warn.is_none());
    }

    #[test]
    fn test_resolve_unparseable_mapping_is_used_verbatim() {
        let mut map = UrlMap::new();
        map.insert("odd.html".into(), "not a url".into());
        let (row, warn) = resolve(record("odd.html"), &map);
        assert_eq!(row.label, "not a url");
        assert_eq!(row.href, "not a url");
        assert!(warn.is_none());
    }

    #[test]
    fn test_resolve_miss_keeps_raw_filename() {
        let (row, warn) = resolve(record("lost.html"), &UrlMap::new());
        assert_eq!(row.label, "lost.html");
        assert_eq!(row.href, "lost.html");
        assert_eq!(warn, Some(Warning::MapLookupMiss { file: "lost.html".into() }));
    }

    #[test]
    fn test_load_url_map_variants() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        let (map, warn) = load_url_map(None, root);
        assert!(map.is_empty());
        assert!(matches!(warn, Some(Warning::MapUnavailable { .. })));

        let p = root.join("map.json");
        fs::write(&p, r#"{"a.html": "http://x/a.html", "n": 3}"#).unwrap();
        let (map, warn) = load_url_map(Some(&p), root);
        assert!(warn.is_none());
        assert_eq!(map.len(), 1);
        assert_eq!(map["a.html"], "http://x/a.html");

        fs::write(&p, "[]").unwrap();
        let (map, warn) = load_url_map(Some(&p), root);
        assert!(map.is_empty());
        assert!(matches!(warn, Some(Warning::MapParse { .. })));

        fs::write(&p, "{broken").unwrap();
        let (_, warn) = load_url_map(Some(&p), root);
        assert!(matches!(warn, Some(Warning::MapParse { .. })));
    }
}
