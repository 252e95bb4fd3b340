// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Top-level PCD reader.
//!
//! [`PcdReader`] owns the file bytes and the parsed header. Everything it
//! hands out ([`Point`], [`Points`]) borrows from it, so no view can
//! outlive the bytes it points into.
//!
//! # Example
//!
//! ```rust,no_run
//! use pcdview::PcdReader;
//!
//! let reader = PcdReader::open("cloud.pcd")?;
//! println!("{} points, fields {:?}", reader.len(), reader.fields());
//!
//! for point in &reader {
//!     let point = point?;
//!     let (x, y, z) = (
//!         point.get::<f32>("x")?,
//!         point.get::<f32>("y")?,
//!         point.get::<f32>("z")?,
//!     );
//!     println!("{x} {y} {z}");
//! }
//!
//! // Random access reuses positions already scanned.
//! let last = reader.point_at(reader.len() - 1)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod strategy;

pub use builder::{ReaderBuilder, ReaderConfig};
pub use strategy::LoadStrategy;

use std::path::Path;

use tracing::debug;

use crate::core::Encoding;
use crate::io::cursor::Points;
use crate::io::header::Header;
use crate::io::index::RecordIndex;
use crate::io::point::Point;
use crate::io::source::ByteSource;
use crate::{PcdError, Result};

/// Reader over one PCD file.
///
/// The header and bytes are immutable after construction. The only
/// internal state that changes is the ASCII random-access cache used by
/// [`point_at`](Self::point_at), which makes the reader `Send` but not
/// `Sync`.
#[derive(Debug)]
pub struct PcdReader {
    source: ByteSource,
    header: Header,
    /// Offset of the first data byte in `source`
    data_offset: usize,
    index: RecordIndex,
}

impl PcdReader {
    /// Open a file with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PcdError::Io`] if the file cannot be loaded, or a header
    /// error if the file is not a valid PCD file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        ReaderBuilder::new().path(path).build()
    }

    /// Parse a PCD file held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_source(ByteSource::from_bytes(bytes))
    }

    /// Parse the header of an already loaded source.
    pub fn from_source(source: ByteSource) -> Result<Self> {
        let (header, data_offset) = Header::parse(source.data()).map_err(|e| {
            debug!(
                context = "pcd_reader",
                path = source.path(),
                error = %e,
                details = ?e.log_fields(),
                "Rejected PCD file"
            );
            e
        })?;
        let index = RecordIndex::for_header(&header);

        debug!(
            context = "pcd_reader",
            path = source.path(),
            points = header.points,
            encoding = %header.encoding,
            data_len = source.len() - data_offset,
            mapped = source.is_mapped(),
            "Opened PCD file"
        );

        Ok(Self {
            source,
            header,
            data_offset,
            index,
        })
    }

    /// The parsed header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Number of points declared by the header.
    pub fn len(&self) -> usize {
        self.header.points
    }

    /// Check if the header declares no points.
    pub fn is_empty(&self) -> bool {
        self.header.points == 0
    }

    /// Field names in record order.
    pub fn fields(&self) -> Vec<&str> {
        self.header.field_names()
    }

    /// Declared cloud width.
    pub fn width(&self) -> u32 {
        self.header.width
    }

    /// Declared cloud height.
    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Format version string.
    pub fn version(&self) -> &str {
        &self.header.version
    }

    /// Viewpoint string, uninterpreted.
    pub fn viewpoint(&self) -> &str {
        &self.header.viewpoint
    }

    /// Data section encoding.
    pub fn encoding(&self) -> Encoding {
        self.header.encoding
    }

    /// Bytes per binary record.
    pub fn record_stride(&self) -> usize {
        self.header.record_stride()
    }

    /// The data region: every byte after the DATA line.
    pub fn data(&self) -> &[u8] {
        &self.source.data()[self.data_offset..]
    }

    /// Path the reader was opened from (empty for in-memory readers).
    pub fn path(&self) -> &str {
        self.source.path()
    }

    /// Whether the file is memory-mapped.
    pub fn is_mapped(&self) -> bool {
        self.source.is_mapped()
    }

    /// Iterate all records in file order.
    ///
    /// Every call starts a fresh pass from the first record.
    pub fn points(&self) -> Points<'_> {
        Points::new(&self.header, self.data())
    }

    /// The record at `index`.
    ///
    /// Binary records are located by stride arithmetic. ASCII records are
    /// located by scanning forward from the nearest record already visited
    /// by an earlier call, so increasing indices cost O(1) amortized.
    ///
    /// # Errors
    ///
    /// - [`PcdError::IndexOutOfRange`] if `index >= len()`
    /// - [`PcdError::TruncatedRecord`] if the record is shorter than declared,
    ///   or is missing because the data ends early
    pub fn point_at(&self, index: usize) -> Result<Point<'_>> {
        if index >= self.header.points {
            return Err(PcdError::index_out_of_range(index, self.header.points));
        }
        let region = self.data();
        match self.index.offset_of(region, index) {
            Some(offset) => Point::new(&self.header, &region[offset..]),
            None => Err(self.missing_record()),
        }
    }

    /// Error for an ASCII record that lies past the end of the data.
    fn missing_record(&self) -> PcdError {
        let field = self.header.fields.first().map_or("", |f| f.name.as_str());
        PcdError::truncated(field, self.header.values_per_record(), 0)
    }

    /// Collect the points for which `pred` returns `true`, in file order.
    ///
    /// # Errors
    ///
    /// Returns the first record error encountered.
    pub fn filter<P>(&self, mut pred: P) -> Result<Vec<Point<'_>>>
    where
        P: FnMut(&Point<'_>) -> bool,
    {
        let mut selected = Vec::new();
        for point in self.points() {
            let point = point?;
            if pred(&point) {
                selected.push(point);
            }
        }
        Ok(selected)
    }

    /// Fold every point into an accumulator, in file order.
    ///
    /// # Errors
    ///
    /// Returns the first record error encountered.
    pub fn fold<T, F>(&self, init: T, mut f: F) -> Result<T>
    where
        F: FnMut(T, &Point<'_>) -> T,
    {
        self.points()
            .try_fold(init, |acc, point| point.map(|p| f(acc, &p)))
    }
}

impl<'a> IntoIterator for &'a PcdReader {
    type Item = Result<Point<'a>>;
    type IntoIter = Points<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}
