use std::fs;

use json_core::{
    parse, parse_file, try_parse_file, try_parse_file_with_message, write_file, FormatOptions,
    JsonError, Value,
};
use tempfile::TempDir;

fn write_temp(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn parse_file_reads_whole_document() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "doc.json", "{\n  \"a\": [1, 2]\n}\n");
    let v = parse_file(&path).unwrap();
    assert_eq!(v["a"].len(), 2);
}

#[test]
fn parse_file_of_missing_path_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    match parse_file(&path) {
        Err(JsonError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn parse_file_reports_syntax_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "bad.json", "[1,]");
    assert!(matches!(parse_file(&path), Err(JsonError::Syntax { .. })));
}

#[test]
fn try_parse_file_leaves_destination_on_failure() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "bad.json", "{");
    let mut dest = Value::from("previous");
    assert!(!try_parse_file(&path, &mut dest));
    assert_eq!(dest, "previous");

    let mut message = String::new();
    assert!(!try_parse_file_with_message(dir.path().join("absent.json"), &mut dest, &mut message));
    assert!(!message.is_empty());
    assert_eq!(dest, "previous");
}

#[test]
fn try_parse_file_replaces_destination_on_success() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "ok.json", "[true]");
    let mut dest = Value::Null;
    assert!(try_parse_file(&path, &mut dest));
    assert_eq!(dest[0], true);
}

#[test]
fn write_file_then_read_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let v = parse(r#"{"list": [1, {"y": null}], "name": "x"}"#).unwrap();
    write_file(&path, &v, &FormatOptions::pretty()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n    \"list\": [\n        1, "));
    assert_eq!(parse_file(&path).unwrap(), v);
}

#[cfg(not(feature = "sort-keys"))]
#[test]
fn written_file_keeps_insertion_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    write_file(&path, &parse(r#"{"b": 1, "a": 2}"#).unwrap(), &FormatOptions::compact()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"b": 1, "a": 2}"#);
}

#[cfg(feature = "sort-keys")]
#[test]
fn written_file_has_sorted_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    write_file(&path, &parse(r#"{"b": 1, "a": {"z": 0, "y": 0}}"#).unwrap(), &FormatOptions::compact()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"a": {"y": 0, "z": 0}, "b": 1}"#);
}

#[test]
fn write_file_replaces_existing_contents() {
    let dir = TempDir::new().unwrap();
    let path = write_temp(&dir, "out.json", "old contents that are longer than the new ones");
    write_file(&path, &Value::from(1), &FormatOptions::compact()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1");
}

#[test]
fn write_file_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no/such/dir/out.json");
    assert!(matches!(
        write_file(&path, &Value::Null, &FormatOptions::compact()),
        Err(JsonError::Io { .. })
    ));
}
