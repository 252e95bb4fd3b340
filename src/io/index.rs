// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Random access to records by index.
//!
//! Binary records have a fixed stride, so record `k` starts at
//! `k × stride`. ASCII records have variable length; their start offsets
//! are discovered by walking a cursor forward and cached, so each record
//! boundary is scanned at most once per reader.

use std::cell::RefCell;

use tracing::trace;

use crate::core::Encoding;
use crate::io::cursor::{CursorMode, RecordCursor};
use crate::io::header::Header;

/// Record start offsets within the data region.
///
/// The ASCII cache uses interior mutability and is not `Sync`; a reader
/// shared between threads needs external synchronization for random access.
#[derive(Debug)]
pub enum RecordIndex {
    /// Fixed-stride binary records
    Stride(usize),
    /// Cached start offsets of ASCII records, in increasing order.
    /// `offsets[k]` is the start of record `k`; `offsets[0]` is always 0.
    Lines(RefCell<Vec<usize>>),
}

impl RecordIndex {
    /// Index for data described by `header`.
    pub fn for_header(header: &Header) -> Self {
        match header.encoding {
            Encoding::Ascii => RecordIndex::Lines(RefCell::new(vec![0])),
            Encoding::Binary => RecordIndex::Stride(header.record_stride()),
        }
    }

    /// Start offset of record `index` within `region`.
    ///
    /// For ASCII data, walks forward from the highest cached record at or
    /// below `index`, caching every record start it passes. Returns `None`
    /// when the data runs out before record `index` begins; only offsets of
    /// records that exist are cached. The caller is responsible for
    /// bounds-checking `index` against the point count.
    pub fn offset_of(&self, region: &[u8], index: usize) -> Option<usize> {
        match self {
            RecordIndex::Stride(stride) => Some(index * stride),
            RecordIndex::Lines(cache) => {
                let mut offsets = cache.borrow_mut();
                if let Some(&offset) = offsets.get(index) {
                    return Some(offset);
                }

                let last = offsets.len() - 1;
                let mut cursor = RecordCursor::new(&region[offsets[last]..], CursorMode::Ascii);
                for _ in last..index {
                    cursor.advance();
                    if cursor.is_exhausted() {
                        trace!(
                            context = "record_index",
                            requested = index,
                            available = offsets.len(),
                            "ASCII data ends before requested record"
                        );
                        return None;
                    }
                    offsets.push(cursor.offset_in(region));
                }
                trace!(
                    context = "record_index",
                    from = last,
                    to = index,
                    cached = offsets.len(),
                    "Extended ASCII record index"
                );
                Some(offsets[index])
            }
        }
    }

    /// Number of records whose start offset is known without scanning.
    ///
    /// Always `None` for binary data, where every offset is computed.
    pub fn cached_len(&self) -> Option<usize> {
        match self {
            RecordIndex::Stride(_) => None,
            RecordIndex::Lines(cache) => Some(cache.borrow().len()),
        }
    }
}
