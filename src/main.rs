// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

mod gui;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use placement_viz::export::export_hpwl_csv;
use placement_viz::render::{render_to_file, RenderConfig, DEFAULT_DPI};
use placement_viz::PlacementReader;

#[derive(Parser, Debug)]
#[command(version, about = "Visualize placement results", long_about = None)]
struct Args {
    /// Input JSON file
    input_file: PathBuf,
    /// Output image file (.png or .svg); opens a viewer window when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Hide net visualization
    #[arg(long)]
    no_nets: bool,
    /// Raster resolution for PNG output
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: f32,
    /// Also write a per-net HPWL report as CSV
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    let placement = PlacementReader::new()
        .read(&args.input_file)
        .map_err(|e| e.to_string())?;

    if let Some(report) = &args.report {
        export_hpwl_csv(&placement, report).map_err(|e| e.to_string())?;
        println!("HPWL report saved to {}", report.display());
    }

    let config = RenderConfig {
        show_nets: !args.no_nets,
        output: args.output,
        dpi: args.dpi,
    };

    match &config.output {
        Some(path) => {
            render_to_file(&placement, &config).map_err(|e| e.to_string())?;
            println!("Plot saved to {}", path.display());
        }
        None => gui::run(placement, config).map_err(|e| e.to_string())?,
    }

    Ok(())
}
