// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PCD header model and parser.
//!
//! # Header Structure
//!
//! ```text
//! VERSION <string>
//! FIELDS <name> [<name> ...]
//! SIZE <bytes> [<bytes> ...]
//! TYPE <I|U|F> [<I|U|F> ...]
//! COUNT <int> [<int> ...]
//! WIDTH <uint>
//! HEIGHT <uint>
//! VIEWPOINT <string>
//! POINTS <uint>
//! DATA <ascii|binary>
//! ```
//!
//! Directives may appear in any order; DATA ends the header and the data
//! region starts right after its newline. Unknown lines (including `#`
//! comments) are skipped.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{Encoding, LogicalType, TypeClass};
use crate::{PcdError, Result};

/// One column of the point layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name from FIELDS
    pub name: String,
    /// Bytes per component from SIZE
    pub size: u32,
    /// Numeric class from TYPE
    pub type_class: TypeClass,
    /// Components per field from COUNT (1 when COUNT is absent)
    pub count: u32,
    /// Storage type resolved from `(type_class, size)`
    pub logical_type: LogicalType,
}

impl FieldDescriptor {
    /// Bytes this field occupies in a binary record (`size × count`).
    pub fn byte_len(&self) -> usize {
        self.size as usize * self.count as usize
    }
}

/// Parsed PCD header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Format version string (informational)
    pub version: String,
    /// Field layout in record order
    pub fields: Vec<FieldDescriptor>,
    /// Declared cloud width
    pub width: u32,
    /// Declared cloud height
    pub height: u32,
    /// Sensor viewpoint, carried verbatim
    pub viewpoint: String,
    /// Number of records
    pub points: usize,
    /// Data section encoding
    pub encoding: Encoding,
}

impl Header {
    /// Parse a header from the start of `bytes`.
    ///
    /// Returns the header and the offset of the first data byte.
    ///
    /// # Errors
    ///
    /// - [`PcdError::MalformedHeader`] for unparseable numbers, inconsistent
    ///   field directives, or a missing DATA line
    /// - [`PcdError::UnknownEncoding`] if DATA is neither ascii nor binary
    /// - [`PcdError::UnknownType`] for a `(TYPE, SIZE)` pair outside the table
    /// - [`PcdError::SizeMismatch`] if a binary data region does not hold
    ///   exactly `points` records
    pub fn parse(bytes: &[u8]) -> Result<(Self, usize)> {
        parse_header(bytes)
    }

    /// Index of the first field named `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// First field named `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in record order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Bytes per binary record.
    pub fn record_stride(&self) -> usize {
        self.fields.iter().map(FieldDescriptor::byte_len).sum()
    }

    /// ASCII tokens per record.
    pub fn values_per_record(&self) -> usize {
        self.fields.iter().map(|f| f.count as usize).sum()
    }
}

/// Header keywords. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Version,
    Fields,
    Size,
    Type,
    Count,
    Width,
    Height,
    Viewpoint,
    Points,
    Data,
}

impl Directive {
    fn from_keyword(keyword: &[u8]) -> Option<Self> {
        Some(match keyword {
            b"VERSION" => Directive::Version,
            b"FIELDS" => Directive::Fields,
            b"SIZE" => Directive::Size,
            b"TYPE" => Directive::Type,
            b"COUNT" => Directive::Count,
            b"WIDTH" => Directive::Width,
            b"HEIGHT" => Directive::Height,
            b"VIEWPOINT" => Directive::Viewpoint,
            b"POINTS" => Directive::Points,
            b"DATA" => Directive::Data,
            _ => return None,
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            Directive::Version => "VERSION",
            Directive::Fields => "FIELDS",
            Directive::Size => "SIZE",
            Directive::Type => "TYPE",
            Directive::Count => "COUNT",
            Directive::Width => "WIDTH",
            Directive::Height => "HEIGHT",
            Directive::Viewpoint => "VIEWPOINT",
            Directive::Points => "POINTS",
            Directive::Data => "DATA",
        }
    }
}

/// Directive values collected before the field sequences are merged.
#[derive(Debug, Default)]
struct RawHeader {
    version: Option<String>,
    fields: Option<Vec<String>>,
    sizes: Option<Vec<u32>>,
    types: Option<Vec<String>>,
    counts: Option<Vec<u32>>,
    width: Option<u32>,
    height: Option<u32>,
    viewpoint: Option<String>,
    points: Option<usize>,
}

/// Parse a header from the start of `bytes`. See [`Header::parse`].
pub fn parse_header(bytes: &[u8]) -> Result<(Header, usize)> {
    let mut raw = RawHeader::default();
    let mut pos = 0;

    while pos < bytes.len() {
        let line_start = pos;
        let (line, next) = match bytes[pos..].iter().position(|&b| b == b'\n') {
            Some(i) => (&bytes[pos..pos + i], pos + i + 1),
            None => (&bytes[pos..], bytes.len()),
        };
        pos = next;

        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        let (keyword, rest) = match line.iter().position(u8::is_ascii_whitespace) {
            Some(i) => (&line[..i], &line[i + 1..]),
            None => (line, &line[line.len()..]),
        };

        // Unknown lines, `#` comments included, may hold arbitrary bytes.
        let Some(directive) = Directive::from_keyword(keyword) else {
            trace!(
                context = "header",
                offset = line_start,
                line = %String::from_utf8_lossy(line),
                "Skipping unknown header line"
            );
            continue;
        };

        let rest = std::str::from_utf8(rest)
            .map_err(|_| {
                PcdError::malformed_header(
                    directive.as_str(),
                    format!("value at byte {line_start} is not valid UTF-8"),
                )
            })?
            .trim();

        match directive {
            Directive::Version => raw.version = Some(rest.to_string()),
            Directive::Fields => raw.fields = Some(tokens(rest).map(str::to_string).collect()),
            Directive::Size => raw.sizes = Some(parse_list("SIZE", rest)?),
            Directive::Type => raw.types = Some(tokens(rest).map(str::to_string).collect()),
            Directive::Count => raw.counts = Some(parse_list("COUNT", rest)?),
            Directive::Width => raw.width = Some(parse_number("WIDTH", rest)?),
            Directive::Height => raw.height = Some(parse_number("HEIGHT", rest)?),
            Directive::Viewpoint => raw.viewpoint = Some(rest.to_string()),
            Directive::Points => raw.points = Some(parse_number("POINTS", rest)?),
            Directive::Data => {
                let encoding = Encoding::from_data_directive(rest)
                    .ok_or_else(|| PcdError::unknown_encoding(rest))?;
                let header = raw.finish(encoding)?;
                check_data_region(&header, bytes.len() - pos)?;
                debug!(
                    context = "header",
                    fields = header.fields.len(),
                    points = header.points,
                    encoding = %header.encoding,
                    data_offset = pos,
                    "Parsed PCD header"
                );
                return Ok((header, pos));
            }
        }
    }

    Err(PcdError::malformed_header(
        "DATA",
        "reached end of input without a DATA directive",
    ))
}

impl RawHeader {
    /// Merge the per-field directives into descriptors and resolve types.
    fn finish(self, encoding: Encoding) -> Result<Header> {
        let names = self.fields.unwrap_or_default();
        let sizes = self.sizes.unwrap_or_default();
        let types = self.types.unwrap_or_default();
        let counts = match self.counts {
            Some(counts) => counts,
            None => vec![1; names.len()],
        };

        for (directive, len) in [
            ("SIZE", sizes.len()),
            ("TYPE", types.len()),
            ("COUNT", counts.len()),
        ] {
            if len != names.len() {
                return Err(PcdError::malformed_header(
                    directive,
                    format!("{len} values for {} fields", names.len()),
                ));
            }
        }

        let mut fields = Vec::with_capacity(names.len());
        for (((name, size), letter), count) in names.into_iter().zip(sizes).zip(types).zip(counts)
        {
            if count == 0 {
                return Err(PcdError::malformed_header(
                    "COUNT",
                    format!("field '{name}' has a count of 0"),
                ));
            }
            let type_class = TypeClass::from_letter(&letter)
                .ok_or_else(|| PcdError::unknown_type(name.as_str(), letter.as_str(), size))?;
            let logical_type = LogicalType::resolve(type_class, size)
                .ok_or_else(|| PcdError::unknown_type(name.as_str(), letter.as_str(), size))?;
            fields.push(FieldDescriptor {
                name,
                size,
                type_class,
                count,
                logical_type,
            });
        }

        let width = self.width.unwrap_or(0);
        let height = self.height.unwrap_or(0);
        let declared_area = (width as usize).checked_mul(height as usize);
        let points = match (self.points, declared_area) {
            (Some(points), _) => points,
            (None, Some(area)) => area,
            (None, None) => {
                return Err(PcdError::malformed_header(
                    "POINTS",
                    format!("WIDTH {width} x HEIGHT {height} overflows the point count"),
                ))
            }
        };
        if self.width.is_some() && self.height.is_some() && declared_area != Some(points) {
            warn!(
                context = "header",
                width,
                height,
                points,
                "WIDTH x HEIGHT does not match POINTS"
            );
        }

        Ok(Header {
            version: self.version.unwrap_or_default(),
            fields,
            width,
            height,
            viewpoint: self.viewpoint.unwrap_or_default(),
            points,
            encoding,
        })
    }
}

/// Binary data must hold exactly `points` records.
fn check_data_region(header: &Header, region_len: usize) -> Result<()> {
    if header.encoding != Encoding::Binary {
        return Ok(());
    }
    let stride = header.record_stride();
    match header.points.checked_mul(stride) {
        Some(expected) if expected == region_len => Ok(()),
        _ => Err(PcdError::size_mismatch(stride, region_len, header.points)),
    }
}

fn tokens(rest: &str) -> impl Iterator<Item = &str> {
    rest.split_ascii_whitespace()
}

fn parse_number<T: std::str::FromStr>(directive: &str, token: &str) -> Result<T> {
    token.parse().map_err(|_| {
        PcdError::malformed_header(directive, format!("invalid unsigned integer '{token}'"))
    })
}

fn parse_list<T: std::str::FromStr>(directive: &str, rest: &str) -> Result<Vec<T>> {
    tokens(rest).map(|t| parse_number(directive, t)).collect()
}
