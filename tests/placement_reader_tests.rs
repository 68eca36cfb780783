//! Test cases for the placement loader
//!
//! Tests cover:
//! - Schema defaults (`fixed`, net `id`)
//! - Integer, float and string identifiers
//! - Error classification: missing file, malformed JSON, wrong shape
//! - Unresolved pin references are accepted at load time

use placement_viz::{Identifier, LoadError, PlacementReader};
use std::fs;

fn parse(content: &str) -> Result<placement_viz::Placement, LoadError> {
    PlacementReader::new().parse_str(content, "inline.json")
}

#[test]
fn test_sample_file_loads() {
    let placement = PlacementReader::new()
        .read("tests/data/sample_placement.json")
        .expect("sample placement should load");

    assert_eq!(placement.grid.width, 20.0);
    assert_eq!(placement.grid.height, 20.0);
    assert_eq!(placement.cells.len(), 3);
    assert_eq!(placement.nets.len(), 2);
    assert!(placement.cells[0].fixed);
    assert!(!placement.cells[2].fixed, "missing fixed defaults to false");
    assert_eq!(placement.nets[0].id, Some(Identifier::Integer(0)));
    assert_eq!(placement.pin_count(), 5);
}

#[test]
fn test_string_identifiers_and_optional_fields() {
    let placement = parse(
        r#"{
            "grid": {"width": 10, "height": 8},
            "cells": [
                {"id": "u_alu", "x": 0, "y": 0, "w": 2, "h": 1.5},
                {"id": 3, "x": 4, "y": 4, "w": 1, "h": 1, "fixed": true}
            ],
            "nets": [
                {"pins": [
                    {"cell_id": "u_alu", "offset_x": 0.5, "offset_y": 0.5},
                    {"cell_id": 3, "offset_x": 0, "offset_y": 0}
                ]}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(placement.cells[0].id, Identifier::from("u_alu"));
    assert_eq!(placement.cells[0].h, 1.5);
    assert_eq!(placement.cells[1].id, Identifier::from(3));
    assert!(placement.nets[0].id.is_none());
    assert_eq!(placement.nets[0].display_name(0), "net0");
}

#[test]
fn test_unresolved_pin_reference_is_not_a_load_error() {
    let placement = parse(
        r#"{
            "grid": {"width": 10, "height": 10},
            "cells": [{"id": 1, "x": 0, "y": 0, "w": 1, "h": 1}],
            "nets": [{"pins": [
                {"cell_id": 1, "offset_x": 0, "offset_y": 0},
                {"cell_id": 99, "offset_x": 0, "offset_y": 0}
            ]}]
        }"#,
    )
    .unwrap();

    assert!(placement.find_cell(&Identifier::from(99)).is_none());
    assert!(placement.find_cell(&Identifier::from(1)).is_some());
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.json");

    let err = PlacementReader::new().read(&path).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }), "got {err:?}");
    assert!(err.to_string().contains("does_not_exist.json"));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_malformed_json_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"grid\": { \"width\": 10, ").unwrap();

    let err = PlacementReader::new().read(&path).unwrap_err();
    assert!(matches!(err, LoadError::Format { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("Invalid JSON file:"));
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn test_trailing_garbage_is_format_error() {
    let err = parse(r#"{"grid": {"width": 1, "height": 1}, "cells": [], "nets": []} oops"#)
        .unwrap_err();
    assert!(matches!(err, LoadError::Format { .. }), "got {err:?}");
}

#[test]
fn test_missing_required_field_is_invalid() {
    let err = parse(
        r#"{
            "grid": {"width": 10, "height": 10},
            "cells": [{"id": 1, "x": 0, "y": 0, "w": 1}],
            "nets": []
        }"#,
    )
    .unwrap_err();

    match err {
        LoadError::Invalid { message, .. } => assert!(message.contains("`h`"), "{message}"),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn test_missing_top_level_key_is_invalid() {
    let err = parse(r#"{"grid": {"width": 10, "height": 10}, "cells": []}"#).unwrap_err();
    assert!(matches!(err, LoadError::Invalid { .. }), "got {err:?}");
}

#[test]
fn test_wrong_type_is_invalid() {
    let err = parse(r#"{"grid": {"width": "wide", "height": 10}, "cells": [], "nets": []}"#)
        .unwrap_err();
    assert!(matches!(err, LoadError::Invalid { .. }), "got {err:?}");
}

#[test]
fn test_negative_cell_size_is_invalid() {
    let err = parse(
        r#"{
            "grid": {"width": 10, "height": 10},
            "cells": [{"id": 1, "x": 0, "y": 0, "w": -2, "h": 1}],
            "nets": []
        }"#,
    )
    .unwrap_err();

    assert!(matches!(err, LoadError::Invalid { .. }), "got {err:?}");
    assert!(err.to_string().contains("negative size"));
}

#[test]
fn test_duplicate_ids_are_tolerated() {
    let placement = parse(
        r#"{
            "grid": {"width": 10, "height": 10},
            "cells": [
                {"id": 1, "x": 0, "y": 0, "w": 1, "h": 1},
                {"id": 1, "x": 5, "y": 5, "w": 1, "h": 1}
            ],
            "nets": []
        }"#,
    )
    .unwrap();

    assert_eq!(placement.cells.len(), 2);
    assert_eq!(placement.find_cell(&Identifier::from(1)).unwrap().x, 0.0);
}

#[test]
fn test_float_identifiers_load() {
    let placement = parse(
        r#"{
            "grid": {"width": 10, "height": 10},
            "cells": [
                {"id": 1.0, "x": 0, "y": 0, "w": 1, "h": 1},
                {"id": 2.5, "x": 2, "y": 2, "w": 1, "h": 1},
                {"id": 18446744073709551615, "x": 4, "y": 4, "w": 1, "h": 1}
            ],
            "nets": [{"id": 7.0, "pins": [
                {"cell_id": 1, "offset_x": 0, "offset_y": 0},
                {"cell_id": 2.5, "offset_x": 0, "offset_y": 0}
            ]}]
        }"#,
    )
    .unwrap();

    assert_eq!(placement.cells[0].id, Identifier::Integer(1));
    assert_eq!(placement.cells[1].id, Identifier::Real(2.5));
    assert_eq!(placement.cells[2].id, Identifier::Unsigned(u64::MAX));
    assert_eq!(placement.nets[0].display_name(0), "7");
    assert!(placement.find_cell(&Identifier::from(1)).is_some());
    assert!(placement.find_cell(&Identifier::from(2.5)).is_some());
}
