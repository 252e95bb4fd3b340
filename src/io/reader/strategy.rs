// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Load strategies for the byte source.
//!
//! - **Mmap**: Map the file read-only (no copy, pages loaded on demand)
//! - **Buffered**: Read the whole file into memory
//! - **Auto**: Map, falling back to a buffered read when mapping fails

/// How the file bytes are brought into memory.
///
/// All strategies expose identical bytes; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStrategy {
    /// Memory-map the file; mapping failure is an error
    Mmap,
    /// Read the whole file into an owned buffer
    Buffered,
    /// Memory-map when possible, otherwise read into a buffer
    #[default]
    Auto,
}

impl LoadStrategy {
    /// Check if this strategy attempts a memory map.
    pub fn tries_mmap(&self) -> bool {
        matches!(self, LoadStrategy::Mmap | LoadStrategy::Auto)
    }

    /// Check if this strategy may read into a buffer.
    pub fn allows_buffered(&self) -> bool {
        matches!(self, LoadStrategy::Buffered | LoadStrategy::Auto)
    }
}
