use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

const CSV: &str = "Date,Close,Volume\n1,10,200\n2,12,180\n3,11,210\n";

fn write_csv(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("prices.csv");
    fs::write(&path, CSV).unwrap();
    path
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("chartgrid").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("chartgrid"));
}

#[test]
fn render_writes_an_svg_chart() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(&dir);
    let out = dir.path().join("chart.svg");

    let mut cmd = Command::cargo_bin("chartgrid").unwrap();
    cmd.arg("render")
        .arg("--input")
        .arg(&input)
        .args(["--series", "line:X=Date,Y=Close"])
        .args(["--series", "bar:Label=Date,Value=Volume"])
        .args(["--set", "0:Series/Title=Close price"])
        .args(["--title", "Prices", "--width", "640", "--height", "360"])
        .arg("--out")
        .arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote 2 series (6 items)"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("Close price"));
    assert!(svg.contains("640"));
}

#[test]
fn render_rejects_unknown_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(&dir);
    let out = dir.path().join("chart.png");

    let mut cmd = Command::cargo_bin("chartgrid").unwrap();
    cmd.arg("render")
        .arg("--input")
        .arg(&input)
        .args(["--series", "line:Y=Missing"])
        .arg("--out")
        .arg(&out);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing"));
    assert!(!out.exists());
}

#[test]
fn render_rejects_unsupported_formats() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(&dir);

    let mut cmd = Command::cargo_bin("chartgrid").unwrap();
    cmd.arg("render")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(dir.path().join("chart.pdf"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unsupported export format"));
}

#[test]
fn properties_lists_series_settings_as_json() {
    let mut cmd = Command::cargo_bin("chartgrid").unwrap();
    cmd.args(["properties", "high low", "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let names: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["Title", "Color", "StrokeThickness", "TickLength", "IsVisible"]
    );
}

#[test]
fn properties_lists_export_options() {
    let mut cmd = Command::cargo_bin("chartgrid").unwrap();
    cmd.args(["properties", "export"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Width").and(predicate::str::contains("700")));
}
