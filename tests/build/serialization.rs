//! The published artifact: a bare JSON array with the seven record fields.

use crate::common::{make_record, ownership_record};
use gleaner::build::{encode_index, write_index, write_index_as};
use gleaner::service::parse_index;
use gleaner::{BuildError, SearchIndex};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_artifact_is_bare_array_with_exact_field_names() {
    let bytes = encode_index(&SearchIndex::new(vec![ownership_record()])).unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();

    let records = value.as_array().expect("top level is an array");
    let object = records[0].as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["content", "date", "description", "section", "tags", "title", "url"]
    );
    assert_eq!(object["date"], Value::from(1_700_000_000.0));
    assert_eq!(object["tags"], serde_json::json!(["rust", "memory"]));
}

#[test]
fn test_round_trip_preserves_order_and_fields() {
    let index = SearchIndex::new((0..5).map(|i| make_record(i, &format!("Post {}", i))).collect());
    let bytes = encode_index(&index).unwrap();
    assert_eq!(parse_index(&bytes).unwrap(), index);
}

#[test]
fn test_non_finite_dates_are_rejected() {
    let mut record = make_record(0, "Broken");
    record.date = f64::INFINITY;
    let err = encode_index(&SearchIndex::new(vec![record])).unwrap_err();
    assert!(matches!(err, BuildError::NonFiniteDate { .. }));
}

#[test]
fn test_write_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let first = write_index(dir.path(), b"[]").unwrap();
    let second = write_index(dir.path(), b"[1]").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"[1]");
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "no temp files left behind");
}

#[test]
fn test_write_creates_missing_output_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("public").join("assets");
    let path = write_index(&nested, b"[]").unwrap();
    assert!(path.ends_with("search-index.json"));
    assert!(path.exists());
}

#[test]
fn test_failed_write_keeps_previous_output() {
    let dir = TempDir::new().unwrap();
    let good = encode_index(&SearchIndex::new(vec![ownership_record()])).unwrap();
    let published = write_index(dir.path(), &good).unwrap();

    // A non-empty directory squatting on the target name makes the rename fail
    let blocked = dir.path().join("blocked.json");
    fs::create_dir(&blocked).unwrap();
    fs::write(blocked.join("keep"), b"x").unwrap();

    let err = write_index_as(dir.path(), "blocked.json", b"[]").unwrap_err();
    assert!(matches!(err, BuildError::Write { ref path, .. } if *path == blocked));

    assert_eq!(fs::read(&published).unwrap(), good);
    assert!(blocked.is_dir());
    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["blocked.json", "search-index.json"], "temp file left behind");
}

#[test]
fn test_escaping_output_name_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("public");
    let err = write_index_as(&out, "../search-index.json", b"[]").unwrap_err();
    assert!(matches!(err, BuildError::OutputName { .. }));
    assert!(!dir.path().join("search-index.json").exists());
}
