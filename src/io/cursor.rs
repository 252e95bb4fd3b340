// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Forward-only record cursor over the data region.
//!
//! The cursor holds a shrinking window of the data region whose front is
//! always a record boundary. Each [`advance`](RecordCursor::advance) drops
//! one record from the front:
//! - ASCII: everything up to and including the next `\n`
//! - Binary: exactly one record stride
//!
//! Cursors are `Copy` snapshots, so remembering a position is just keeping
//! a copy of the cursor.

use std::iter::FusedIterator;

use crate::core::Encoding;
use crate::io::header::Header;
use crate::io::point::Point;
use crate::Result;

/// How a cursor finds the next record boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Records end at `\n`
    Ascii,
    /// Records are `stride` bytes long
    Binary {
        /// Bytes per record
        stride: usize,
    },
}

impl CursorMode {
    /// Mode for data described by `header`.
    pub fn for_header(header: &Header) -> Self {
        match header.encoding {
            Encoding::Ascii => CursorMode::Ascii,
            Encoding::Binary => CursorMode::Binary {
                stride: header.record_stride(),
            },
        }
    }

    /// Drop one record from the front of `window`.
    pub fn advance<'a>(&self, window: &'a [u8]) -> &'a [u8] {
        match *self {
            CursorMode::Ascii => match window.iter().position(|&b| b == b'\n') {
                Some(i) => &window[i + 1..],
                None => &window[window.len()..],
            },
            // A zero stride would never make progress; treat it as exhausting.
            CursorMode::Binary { stride: 0 } => &window[window.len()..],
            CursorMode::Binary { stride } => &window[stride.min(window.len())..],
        }
    }
}

/// A position in the data region.
#[derive(Debug, Clone, Copy)]
pub struct RecordCursor<'a> {
    window: &'a [u8],
    mode: CursorMode,
}

impl<'a> RecordCursor<'a> {
    /// Create a cursor whose window starts at a record boundary.
    pub fn new(window: &'a [u8], mode: CursorMode) -> Self {
        Self { window, mode }
    }

    /// Bytes from the current record to the end of the data region.
    #[inline]
    pub fn window(&self) -> &'a [u8] {
        self.window
    }

    /// The cursor's mode.
    #[inline]
    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    /// Check if no records remain.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.window.is_empty()
    }

    /// Move to the next record boundary.
    #[inline]
    pub fn advance(&mut self) {
        self.window = self.mode.advance(self.window);
    }

    /// Byte offset of the current record relative to `region`.
    ///
    /// `region` must be the slice this cursor was created from.
    pub fn offset_in(&self, region: &[u8]) -> usize {
        self.window.as_ptr() as usize - region.as_ptr() as usize
    }
}

impl PartialEq for RecordCursor<'_> {
    /// Cursors are equal when their windows start at the same address and
    /// have the same length.
    fn eq(&self, other: &Self) -> bool {
        self.window.as_ptr() == other.window.as_ptr() && self.window.len() == other.window.len()
    }
}

impl Eq for RecordCursor<'_> {}

/// Iterator over the records of a data region, in file order.
///
/// Each item is a [`Point`] view or the error raised while slicing that
/// record; an error does not stop iteration of later records.
#[derive(Debug, Clone)]
pub struct Points<'a> {
    header: &'a Header,
    cursor: RecordCursor<'a>,
}

impl<'a> Points<'a> {
    /// Iterate the records in `region`.
    pub fn new(header: &'a Header, region: &'a [u8]) -> Self {
        Self {
            header,
            cursor: RecordCursor::new(region, CursorMode::for_header(header)),
        }
    }
}

impl<'a> Iterator for Points<'a> {
    type Item = Result<Point<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_exhausted() {
            return None;
        }
        let point = Point::new(self.header, self.cursor.window());
        self.cursor.advance();
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor.mode() {
            CursorMode::Binary { stride } if stride > 0 => {
                let n = self.cursor.window().len().div_ceil(stride);
                (n, Some(n))
            }
            _ if self.cursor.is_exhausted() => (0, Some(0)),
            _ => (1, None),
        }
    }
}

impl FusedIterator for Points<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_advance() {
        let data = b"1 2\n3 4\n5 6";
        let mut cursor = RecordCursor::new(data, CursorMode::Ascii);
        assert_eq!(cursor.window(), b"1 2\n3 4\n5 6");
        cursor.advance();
        assert_eq!(cursor.window(), b"3 4\n5 6");
        cursor.advance();
        assert_eq!(cursor.window(), b"5 6");
        cursor.advance();
        assert!(cursor.is_exhausted());
        cursor.advance();
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_binary_advance() {
        let data = [0u8, 1, 2, 3, 4, 5, 6];
        let mut cursor = RecordCursor::new(&data, CursorMode::Binary { stride: 3 });
        cursor.advance();
        assert_eq!(cursor.window(), &[3u8, 4, 5, 6]);
        cursor.advance();
        assert_eq!(cursor.window(), &[6u8]);
        cursor.advance();
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_cursors_are_independent_snapshots() {
        let data = b"a\nb\nc\n";
        let start = RecordCursor::new(data, CursorMode::Ascii);
        let mut moved = start;
        moved.advance();
        assert_eq!(start.window(), b"a\nb\nc\n");
        assert_eq!(moved.window(), b"b\nc\n");
        assert_ne!(start, moved);

        let mut again = start;
        again.advance();
        assert_eq!(again, moved);
    }

    #[test]
    fn test_equality_is_positional() {
        let data = b"x\nx\n";
        let first = RecordCursor::new(&data[..2], CursorMode::Ascii);
        let second = RecordCursor::new(&data[2..], CursorMode::Ascii);
        // Same bytes, different positions.
        assert_eq!(first.window(), second.window());
        assert_ne!(first, second);
    }

    #[test]
    fn test_offset_in_region() {
        let data = b"10\n200\n3000\n";
        let mut cursor = RecordCursor::new(data, CursorMode::Ascii);
        assert_eq!(cursor.offset_in(data), 0);
        cursor.advance();
        assert_eq!(cursor.offset_in(data), 3);
        cursor.advance();
        assert_eq!(cursor.offset_in(data), 7);
    }

    #[test]
    fn test_points_iterator_restarts() {
        let input = b"FIELDS v\nSIZE 4\nTYPE I\nPOINTS 3\nDATA ascii\n1\n2\n3\n";
        let (header, offset) = Header::parse(input).unwrap();
        let region = &input[offset..];

        let first: Vec<i32> = Points::new(&header, region)
            .map(|p| p.unwrap().get::<i32>("v").unwrap())
            .collect();
        let second: Vec<i32> = Points::new(&header, region)
            .map(|p| p.unwrap().get::<i32>("v").unwrap())
            .collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_binary_size_hint() {
        let input = b"FIELDS v\nSIZE 2\nTYPE U\nPOINTS 3\nDATA binary\n\x01\x00\x02\x00\x03\x00";
        let (header, offset) = Header::parse(input).unwrap();
        let mut points = Points::new(&header, &input[offset..]);
        assert_eq!(points.size_hint(), (3, Some(3)));
        assert_eq!(points.next().unwrap().unwrap().get::<u16>("v").unwrap(), 1);
        assert_eq!(points.size_hint(), (2, Some(2)));
        assert_eq!(points.count(), 2);
    }
}
