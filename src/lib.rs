// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # pcdview
//!
//! Zero-copy reader for PCD (Point Cloud Data) files.
//!
//! A PCD file is a short text header followed by a data section holding
//! one record per point, either as whitespace-separated ASCII lines or as
//! packed little-endian binary records. This crate parses the header once,
//! then exposes records as lazy views into the file bytes:
//!
//! - [`PcdReader`] owns the bytes and the [`Header`]
//! - [`Point`] slices one record per field and decodes on request
//! - [`FieldValue`] is the decoded value of one field component
//!
//! ## Architecture
//!
//! - `core/` - Error type, logical types and decoded values
//! - `io/` - Byte source, header parser, record cursor, point view, reader
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pcdview::PcdReader;
//!
//! let reader = PcdReader::open("cloud.pcd")?;
//! let sum_z = reader.fold(0.0, |acc, p| acc + p.get_f64("z").unwrap_or(0.0))?;
//! println!("mean z = {}", sum_z / reader.len() as f64);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{Encoding, FieldValue, FromFieldValue, LogicalType, PcdError, Result, TypeClass};

// I/O types (byte source, header, cursor, point, reader)
pub mod io;

// Re-export key I/O types
pub use io::{FieldDescriptor, Header, LoadStrategy, PcdReader, Point, Points, ReaderBuilder};
