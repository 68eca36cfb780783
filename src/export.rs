// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use csv::Writer;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::placement::Placement;
use crate::render::scene::{index_cells, measure_nets, total_hpwl, NetGeometry};

#[derive(Debug, Serialize)]
pub struct NetCsvRecord {
    #[serde(rename = "Net")]
    pub net: String,
    #[serde(rename = "Pins")]
    pub pins: usize,
    #[serde(rename = "Resolved")]
    pub resolved: usize,
    #[serde(rename = "MinX")]
    pub min_x: Option<f64>,
    #[serde(rename = "MinY")]
    pub min_y: Option<f64>,
    #[serde(rename = "MaxX")]
    pub max_x: Option<f64>,
    #[serde(rename = "MaxY")]
    pub max_y: Option<f64>,
    #[serde(rename = "HPWL")]
    pub hpwl: Option<f64>,
}

/// Convert a NetGeometry to a NetCsvRecord
fn net_to_csv_record(net: &NetGeometry) -> NetCsvRecord {
    NetCsvRecord {
        net: net.name.clone(),
        pins: net.pin_count,
        resolved: net.pins.len(),
        min_x: net.bbox.map(|b| b.min_x),
        min_y: net.bbox.map(|b| b.min_y),
        max_x: net.bbox.map(|b| b.max_x),
        max_y: net.bbox.map(|b| b.max_y),
        hpwl: net.hpwl(),
    }
}

/// One record per net, in input order
pub fn hpwl_records(placement: &Placement) -> Vec<NetCsvRecord> {
    let cells = index_cells(placement);
    measure_nets(placement, &cells)
        .iter()
        .map(net_to_csv_record)
        .collect()
}

/// Export per-net HPWL of a placement to CSV file
pub fn export_hpwl_csv<P: AsRef<Path>>(
    placement: &Placement,
    file_path: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let cells = index_cells(placement);
    let nets = measure_nets(placement, &cells);

    let file = File::create(file_path.as_ref())?;
    let mut writer = Writer::from_writer(file);

    for net in &nets {
        writer.serialize(net_to_csv_record(net))?;
    }

    writer.flush()?;
    info!(
        "[SAVE] HPWL report for {} nets (total {:.2}) written to {}",
        nets.len(),
        total_hpwl(&nets),
        file_path.as_ref().display()
    );
    Ok(())
}
