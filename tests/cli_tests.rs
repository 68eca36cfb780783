//! Exit codes and messages of the command-line tool

use std::fs;
use std::process::Command;

fn viz() -> Command {
    Command::new(env!("CARGO_BIN_EXE_placement-viz"))
}

#[test]
fn test_missing_input_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nowhere.json");

    let output = viz().arg(&input).arg("-o").arg(dir.path().join("out.png")).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: File"), "{stderr}");
    assert!(stderr.contains("nowhere.json"), "{stderr}");
    assert!(stderr.contains("not found"), "{stderr}");
}

#[test]
fn test_malformed_input_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, "{ not json").unwrap();

    let output = viz().arg(&input).arg("-o").arg(dir.path().join("out.png")).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Invalid JSON file:"), "{stderr}");
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn test_wrong_shape_exits_with_generic_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shape.json");
    fs::write(&input, r#"{"grid": {"width": 10, "height": 10}, "cells": [{"id": 1}], "nets": []}"#)
        .unwrap();

    let output = viz().arg(&input).arg("-o").arg(dir.path().join("out.png")).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(!stderr.contains("Invalid JSON file"), "{stderr}");
    assert!(!stderr.contains("not found"), "{stderr}");
}

#[test]
fn test_successful_render_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("placement.svg");
    let report = dir.path().join("hpwl.csv");

    let output = viz()
        .arg("tests/data/sample_placement.json")
        .arg("--output")
        .arg(&out)
        .arg("--no-nets")
        .arg("--report")
        .arg(&report)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("Plot saved to {}", out.display())), "{stdout}");

    let svg = fs::read_to_string(&out).unwrap();
    assert!(!svg.contains("<circle"));
    assert!(report.exists());
}
