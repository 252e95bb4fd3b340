// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Lazy view over one record.
//!
//! A [`Point`] slices its record into one byte range per field when it is
//! created and decodes nothing until a field is requested. Field values
//! are decoded from those slices on every access, so a point is cheap to
//! create and to drop.

use crate::core::{Encoding, FieldValue, FromFieldValue};
use crate::io::header::{FieldDescriptor, Header};
use crate::{PcdError, Result};

/// One record of the data region, bound to its header.
#[derive(Debug, Clone)]
pub struct Point<'a> {
    header: &'a Header,
    /// Record bytes (the line for ASCII, one stride for binary)
    record: &'a [u8],
    /// One slice per field, in field order
    slices: Vec<&'a [u8]>,
}

impl<'a> Point<'a> {
    /// Slice the record at the front of `window` into per-field ranges.
    ///
    /// # Errors
    ///
    /// Returns [`PcdError::TruncatedRecord`] if the record holds fewer
    /// tokens (ASCII) or bytes (binary) than the header declares.
    pub fn new(header: &'a Header, window: &'a [u8]) -> Result<Self> {
        match header.encoding {
            Encoding::Ascii => Self::slice_ascii(header, window),
            Encoding::Binary => Self::slice_binary(header, window),
        }
    }

    fn slice_ascii(header: &'a Header, window: &'a [u8]) -> Result<Self> {
        let line = match window.iter().position(|&b| b == b'\n') {
            Some(i) => &window[..i],
            None => window,
        };
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let mut tokens = TokenSpans::new(line);
        let mut slices = Vec::with_capacity(header.fields.len());
        let mut needed = 0;
        let mut seen = 0;

        for field in &header.fields {
            let count = field.count as usize;
            needed += count;
            let Some((start, mut end)) = tokens.next() else {
                return Err(PcdError::truncated(field.name.as_str(), needed, seen));
            };
            seen += 1;
            for _ in 1..count {
                let Some((_, next_end)) = tokens.next() else {
                    return Err(PcdError::truncated(field.name.as_str(), needed, seen));
                };
                end = next_end;
                seen += 1;
            }
            slices.push(&line[start..end]);
        }

        Ok(Self {
            header,
            record: line,
            slices,
        })
    }

    fn slice_binary(header: &'a Header, window: &'a [u8]) -> Result<Self> {
        let mut slices = Vec::with_capacity(header.fields.len());
        let mut offset = 0;

        for field in &header.fields {
            let end = offset + field.byte_len();
            if end > window.len() {
                return Err(PcdError::truncated(field.name.as_str(), end, window.len()));
            }
            slices.push(&window[offset..end]);
            offset = end;
        }

        Ok(Self {
            header,
            record: &window[..offset],
            slices,
        })
    }

    /// The header this point is bound to.
    pub fn header(&self) -> &'a Header {
        self.header
    }

    /// The record's bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.record
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.slices.len()
    }

    /// Raw bytes of a field, without interpretation.
    ///
    /// For ASCII this is the field's text (all components for multi-count
    /// fields); for binary it is `size × count` bytes.
    pub fn raw(&self, name: &str) -> Result<&'a [u8]> {
        let idx = self.field_index(name)?;
        Ok(self.slices[idx])
    }

    /// Raw bytes of a field copied into a string, for display.
    pub fn raw_string(&self, name: &str) -> Result<String> {
        self.raw(name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Decoded value of a field's first component in its native type.
    pub fn value(&self, name: &str) -> Result<FieldValue> {
        let idx = self.field_index(name)?;
        self.decode(idx, 0)
    }

    /// Value of a field's first component converted to `T`.
    ///
    /// Conversion follows `as` casts: no overflow checking.
    ///
    /// # Example
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use pcdview::PcdReader;
    ///
    /// let pcd = b"FIELDS x y\nSIZE 4 4\nTYPE F F\nPOINTS 1\nDATA ascii\n1.5 2.5\n";
    /// let reader = PcdReader::from_bytes(pcd.to_vec())?;
    /// let point = reader.point_at(0)?;
    /// assert_eq!(point.get::<f32>("y")?, 2.5);
    /// assert_eq!(point.get::<i32>("x")?, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn get<T: FromFieldValue>(&self, name: &str) -> Result<T> {
        self.value(name).map(T::from_value)
    }

    /// Value of a field's first component as `f64`.
    pub fn get_f64(&self, name: &str) -> Result<f64> {
        self.get::<f64>(name)
    }

    /// The `index`-th component of a field, converted to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`PcdError::IndexOutOfRange`] if `index >= count`.
    pub fn component<T: FromFieldValue>(&self, name: &str, index: usize) -> Result<T> {
        let idx = self.field_index(name)?;
        self.decode(idx, index).map(T::from_value)
    }

    /// All components of a field, converted to `T`.
    pub fn components<T: FromFieldValue>(&self, name: &str) -> Result<Vec<T>> {
        let idx = self.field_index(name)?;
        (0..self.header.fields[idx].count as usize)
            .map(|i| self.decode(idx, i).map(T::from_value))
            .collect()
    }

    fn field_index(&self, name: &str) -> Result<usize> {
        self.header
            .field_index(name)
            .ok_or_else(|| PcdError::unknown_field(name))
    }

    fn decode(&self, idx: usize, component: usize) -> Result<FieldValue> {
        let field: &FieldDescriptor = &self.header.fields[idx];
        let count = field.count as usize;
        if component >= count {
            return Err(PcdError::index_out_of_range(component, count));
        }
        let slice = self.slices[idx];

        match self.header.encoding {
            Encoding::Ascii => {
                let (start, end) = TokenSpans::new(slice)
                    .nth(component)
                    .ok_or_else(|| PcdError::truncated(field.name.as_str(), count, component))?;
                let token = &slice[start..end];
                std::str::from_utf8(token)
                    .ok()
                    .and_then(|text| field.logical_type.parse_text(text))
                    .ok_or_else(|| {
                        PcdError::malformed_value(
                            field.name.as_str(),
                            String::from_utf8_lossy(token),
                        )
                    })
            }
            Encoding::Binary => {
                let start = component * field.size as usize;
                field.logical_type.decode(&slice[start..])
            }
        }
    }
}

/// Byte ranges of space- or tab-separated tokens in a line.
struct TokenSpans<'a> {
    line: &'a [u8],
    pos: usize,
}

impl<'a> TokenSpans<'a> {
    fn new(line: &'a [u8]) -> Self {
        Self { line, pos: 0 }
    }
}

impl Iterator for TokenSpans<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let is_sep = |b: &u8| *b == b' ' || *b == b'\t';
        let rest = &self.line[self.pos..];
        let start = self.pos + rest.iter().position(|b| !is_sep(b))?;
        let end = start
            + self.line[start..]
                .iter()
                .position(is_sep)
                .unwrap_or(self.line.len() - start);
        self.pos = end;
        Some((start, end))
    }
}
