use placement_viz::export::{export_hpwl_csv, hpwl_records};
use placement_viz::PlacementReader;
use std::fs;

#[test]
fn test_hpwl_records_for_sample() {
    let placement = PlacementReader::new()
        .read("tests/data/sample_placement.json")
        .unwrap();
    let records = hpwl_records(&placement);

    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.net, "0");
    assert_eq!(first.pins, 3);
    assert_eq!(first.resolved, 3);
    assert_eq!(first.min_x, Some(2.0));
    assert_eq!(first.max_y, Some(10.0));
    assert_eq!(first.hpwl, Some(20.0));

    let second = &records[1];
    assert_eq!(second.pins, 2);
    assert_eq!(second.resolved, 1);
    assert_eq!(second.hpwl, None);
}

#[test]
fn test_hpwl_csv_export() {
    let placement = PlacementReader::new()
        .read("tests/data/sample_placement.json")
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hpwl.csv");

    export_hpwl_csv(&placement, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Net,Pins,Resolved,MinX,MinY,MaxX,MaxY,HPWL");
    assert_eq!(lines[1], "0,3,3,2.0,2.0,14.0,10.0,20.0");
    assert_eq!(lines[2], "1,2,1,,,,,");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_hpwl_report_is_independent_of_net_display() {
    // Reports always cover every net, even with no pins at all
    let placement = PlacementReader::new()
        .parse_str(
            r#"{"grid": {"width": 4, "height": 4}, "cells": [], "nets": [{"id": "clk", "pins": []}]}"#,
            "inline.json",
        )
        .unwrap();
    let records = hpwl_records(&placement);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].net, "clk");
    assert_eq!(records[0].resolved, 0);
}
