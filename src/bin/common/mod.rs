// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use pcdview::{FieldValue, PcdReader, Point};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Open a PCD file with the default load strategy.
pub fn open_reader(path: &Path) -> Result<PcdReader> {
    Ok(PcdReader::open(path)?)
}

/// Format the named fields of a point as one space-separated line.
///
/// Multi-count fields print every component.
pub fn format_point(point: &Point<'_>, fields: &[String]) -> Result<String> {
    let mut parts = Vec::with_capacity(fields.len());
    for name in fields {
        for value in point.components::<FieldValue>(name)? {
            parts.push(value.to_string());
        }
    }
    Ok(parts.join(" "))
}
