// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Points command - print field values per point.

use std::path::PathBuf;

use clap::Args;

use crate::common::{format_point, open_reader, Result};

/// Print point values.
#[derive(Args, Clone, Debug)]
pub struct PointsCmd {
    /// Input PCD file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Comma-separated fields to print (all fields if not specified)
    #[arg(short, long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Maximum number of points to print
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Print only the point at this index
    #[arg(short, long, conflicts_with = "limit")]
    index: Option<usize>,
}

impl PointsCmd {
    pub fn run(self) -> Result<()> {
        let reader = open_reader(&self.input)?;

        let fields: Vec<String> = if self.fields.is_empty() {
            reader.fields().into_iter().map(String::from).collect()
        } else {
            self.fields
        };

        if let Some(index) = self.index {
            let point = reader.point_at(index)?;
            println!("{}", format_point(&point, &fields)?);
            return Ok(());
        }

        println!("# {}", fields.join(" "));
        let limit = self.limit.unwrap_or(usize::MAX);
        for point in reader.points().take(limit) {
            println!("{}", format_point(&point?, &fields)?);
        }

        Ok(())
    }
}
