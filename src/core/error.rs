// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for pcdview.
//!
//! Errors fall into two groups:
//! - Construction errors (I/O, header, size consistency), raised by
//!   [`PcdReader`](crate::io::reader::PcdReader) before any record is visible
//! - Access errors (truncated records, unknown fields, bad values), raised
//!   lazily when a record or field is touched

use thiserror::Error;

/// Errors that can occur while reading a PCD file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcdError {
    /// The file could not be opened, stat'ed, mapped or read.
    #[error("I/O error in {context}: {message}")]
    Io {
        /// Operation that failed
        context: String,
        /// Underlying error message
        message: String,
    },

    /// A header directive is missing, inconsistent or unparseable.
    #[error("Malformed header directive '{directive}': {reason}")]
    MalformedHeader {
        /// Directive keyword (e.g. "SIZE")
        directive: String,
        /// What went wrong
        reason: String,
    },

    /// The DATA directive names neither `ascii` nor `binary`.
    #[error("Unknown data encoding '{value}', expected 'ascii' or 'binary'")]
    UnknownEncoding {
        /// Remainder of the DATA line
        value: String,
    },

    /// A `(TYPE, SIZE)` pair has no logical numeric type.
    #[error("Unknown type for field '{field}': TYPE {type_class} with SIZE {size}")]
    UnknownType {
        /// Field name
        field: String,
        /// Type class letter as written in the header
        type_class: String,
        /// Byte size as written in the header
        size: u32,
    },

    /// Binary data region does not hold exactly `points` records.
    #[error(
        "Binary data size mismatch: record stride {stride} bytes, data region {region_len} bytes, {points} points"
    )]
    SizeMismatch {
        /// Bytes per record
        stride: usize,
        /// Observed data region length
        region_len: usize,
        /// Declared point count
        points: usize,
    },

    /// A record holds fewer values than the header declares.
    #[error("Truncated record at field '{field}': expected {expected}, found {found}")]
    TruncatedRecord {
        /// First field that could not be sliced
        field: String,
        /// Tokens (ASCII) or bytes (binary) needed through this field
        expected: usize,
        /// Tokens or bytes actually present
        found: usize,
    },

    /// Field name not present in FIELDS.
    #[error("Unknown field '{name}'")]
    UnknownField {
        /// Requested name
        name: String,
    },

    /// Point or component index past the end.
    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of available elements
        len: usize,
    },

    /// An ASCII token is not a number.
    #[error("Malformed value for field '{field}': '{text}'")]
    MalformedValue {
        /// Field name
        field: String,
        /// Offending token
        text: String,
    },

    /// Not enough bytes to decode a value.
    #[error("Buffer too short: requested {requested} bytes, but only {available} bytes available")]
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
    },
}

impl PcdError {
    /// Create an I/O error.
    pub fn io(context: impl Into<String>, message: impl Into<String>) -> Self {
        PcdError::Io {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a malformed header error.
    pub fn malformed_header(directive: impl Into<String>, reason: impl Into<String>) -> Self {
        PcdError::MalformedHeader {
            directive: directive.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown encoding error.
    pub fn unknown_encoding(value: impl Into<String>) -> Self {
        PcdError::UnknownEncoding {
            value: value.into(),
        }
    }

    /// Create an unknown type error.
    pub fn unknown_type(field: impl Into<String>, type_class: impl Into<String>, size: u32) -> Self {
        PcdError::UnknownType {
            field: field.into(),
            type_class: type_class.into(),
            size,
        }
    }

    /// Create a size mismatch error.
    pub fn size_mismatch(stride: usize, region_len: usize, points: usize) -> Self {
        PcdError::SizeMismatch {
            stride,
            region_len,
            points,
        }
    }

    /// Create a truncated record error.
    pub fn truncated(field: impl Into<String>, expected: usize, found: usize) -> Self {
        PcdError::TruncatedRecord {
            field: field.into(),
            expected,
            found,
        }
    }

    /// Create an unknown field error.
    pub fn unknown_field(name: impl Into<String>) -> Self {
        PcdError::UnknownField { name: name.into() }
    }

    /// Create an index out of range error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        PcdError::IndexOutOfRange { index, len }
    }

    /// Create a malformed value error.
    pub fn malformed_value(field: impl Into<String>, text: impl Into<String>) -> Self {
        PcdError::MalformedValue {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize) -> Self {
        PcdError::BufferTooShort {
            requested,
            available,
        }
    }

    /// Whether this error is raised while opening a reader rather than
    /// while accessing a record.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            PcdError::Io { .. }
                | PcdError::MalformedHeader { .. }
                | PcdError::UnknownEncoding { .. }
                | PcdError::UnknownType { .. }
                | PcdError::SizeMismatch { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            PcdError::Io { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            PcdError::MalformedHeader { directive, reason } => vec![
                ("directive", directive.clone()),
                ("reason", reason.clone()),
            ],
            PcdError::UnknownEncoding { value } => vec![("encoding", value.clone())],
            PcdError::UnknownType {
                field,
                type_class,
                size,
            } => vec![
                ("field", field.clone()),
                ("type", type_class.clone()),
                ("size", size.to_string()),
            ],
            PcdError::SizeMismatch {
                stride,
                region_len,
                points,
            } => vec![
                ("stride", stride.to_string()),
                ("region_len", region_len.to_string()),
                ("points", points.to_string()),
            ],
            PcdError::TruncatedRecord {
                field,
                expected,
                found,
            } => vec![
                ("field", field.clone()),
                ("expected", expected.to_string()),
                ("found", found.to_string()),
            ],
            PcdError::UnknownField { name } => vec![("field", name.clone())],
            PcdError::IndexOutOfRange { index, len } => {
                vec![("index", index.to_string()), ("len", len.to_string())]
            }
            PcdError::MalformedValue { field, text } => {
                vec![("field", field.clone()), ("text", text.clone())]
            }
            PcdError::BufferTooShort {
                requested,
                available,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
            ],
        }
    }
}

impl From<std::io::Error> for PcdError {
    fn from(err: std::io::Error) -> Self {
        PcdError::io("IO", err.to_string())
    }
}

/// Result type for pcdview operations.
pub type Result<T> = std::result::Result<T, PcdError>;
