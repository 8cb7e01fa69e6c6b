use chartgrid::{Workspace, checked};
use std::fs;

#[test]
fn missing_files_are_io_errors_and_keep_the_table() {
    let mut ws = Workspace::new();
    ws.add_column("Kept");
    let notice = checked(|| ws.load_csv("/no/such/dir/data.csv")).unwrap_err();
    assert_eq!(notice.category, "I/O error");
    assert!(notice.message.contains("data.csv"));
    assert_eq!(ws.table().columns(), ["Kept"]);
}

#[test]
fn malformed_csv_is_a_csv_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, b"A,B\n\xff\xfe,1\n").unwrap();
    let mut ws = Workspace::new();
    let notice = checked(|| ws.load_csv(&path)).unwrap_err();
    assert_eq!(notice.category, "CSV error");
}

#[test]
fn empty_files_have_no_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();
    let mut ws = Workspace::new();
    let notice = checked(|| ws.load_csv(&path)).unwrap_err();
    assert_eq!(notice.category, "Error");
    assert!(notice.message.contains("no header row"));
}

#[test]
fn property_failures_are_property_errors() {
    let mut ws = Workspace::new();
    let notice = checked(|| Ok(ws.edit_property("Nope", "1")?)).unwrap_err();
    assert_eq!(notice.category, "Property error");
    assert_eq!(notice.to_string(), "Property error: no property named `Nope`");
}
