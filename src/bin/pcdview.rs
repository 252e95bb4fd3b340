// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # pcdview CLI
//!
//! Inspect PCD point cloud files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Show header and field table
//! pcdview info cloud.pcd
//!
//! # Header as JSON
//! pcdview info cloud.pcd --json
//!
//! # First 10 points, x/y/z only
//! pcdview points cloud.pcd --fields x,y,z --limit 10
//!
//! # A single point by index
//! pcdview points cloud.pcd --index 42
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{InfoCmd, PointsCmd};
use common::Result;

/// pcdview - PCD point cloud inspector
///
/// Reads ASCII and binary PCD files without decoding the whole cloud.
#[derive(Parser, Clone)]
#[command(name = "pcdview")]
#[command(about = "Inspect PCD point cloud files", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Show header information and the field table
    Info(InfoCmd),

    /// Print point values
    Points(PointsCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info(cmd) => cmd.run(),
        Commands::Points(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
