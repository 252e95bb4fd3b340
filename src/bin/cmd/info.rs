// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Info command - show header and field table.

use std::path::PathBuf;

use clap::Args;

use crate::common::{open_reader, Result};
use pcdview::PcdReader;

/// Show header information.
#[derive(Args, Clone, Debug)]
pub struct InfoCmd {
    /// Input PCD file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print the header as JSON
    #[arg(long)]
    json: bool,
}

impl InfoCmd {
    pub fn run(self) -> Result<()> {
        let reader = open_reader(&self.input)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(reader.header())?);
            return Ok(());
        }

        print_info(&self.input, &reader);
        Ok(())
    }
}

fn print_info(input: &std::path::Path, reader: &PcdReader) {
    println!("=== {} ===", input.display());
    println!("Version: {}", reader.version());
    println!("Dimensions: {} x {}", reader.width(), reader.height());
    println!("Points: {}", reader.len());
    println!("Encoding: {}", reader.encoding());
    println!("Record stride: {} bytes", reader.record_stride());
    if !reader.viewpoint().is_empty() {
        println!("Viewpoint: {}", reader.viewpoint());
    }

    println!();
    println!("Fields:");
    for field in &reader.header().fields {
        println!(
            "  {:<12} size {} | type {} | count {} | {}",
            field.name, field.size, field.type_class, field.count, field.logical_type
        );
    }
}
