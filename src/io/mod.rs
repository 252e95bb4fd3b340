// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for PCD files.
//!
//! Layers, bottom-up:
//! - [`source`]: owns the file bytes (mmap or buffer)
//! - [`header`]: parses the directive block and validates the data region
//! - [`cursor`]: steps record by record through the data region
//! - [`point`]: lazy per-field view of one record
//! - [`index`]: record start offsets for random access
//! - [`reader`]: ties the above together behind [`PcdReader`]

pub mod cursor;
pub mod header;
pub mod index;
pub mod point;
pub mod reader;
pub mod source;

pub use cursor::{CursorMode, Points, RecordCursor};
pub use header::{parse_header, FieldDescriptor, Header};
pub use index::RecordIndex;
pub use point::Point;
pub use reader::{LoadStrategy, PcdReader, ReaderBuilder, ReaderConfig};
pub use source::ByteSource;
