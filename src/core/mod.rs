// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout pcdview.
//!
//! This module provides the foundational types for the library:
//! - [`PcdError`] - Error taxonomy for construction and record access
//! - [`LogicalType`] / [`FieldValue`] - Field type resolution and decoding
//! - [`Encoding`] - Data section encoding identifier

pub mod error;
pub mod value;

use serde::{Deserialize, Serialize};

pub use error::{PcdError, Result};
pub use value::{FieldValue, FromFieldValue, LogicalType, TypeClass};

/// Data section encoding declared by the DATA directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One whitespace-separated text record per line
    Ascii,
    /// Fixed-stride little-endian records
    Binary,
}

impl Encoding {
    /// Select the encoding from the remainder of a DATA line.
    ///
    /// Matching is by case-sensitive substring, `ascii` first.
    pub fn from_data_directive(value: &str) -> Option<Self> {
        if value.contains("ascii") {
            Some(Encoding::Ascii)
        } else if value.contains("binary") {
            Some(Encoding::Binary)
        } else {
            None
        }
    }

    /// Check if this encoding is ASCII.
    pub fn is_ascii(&self) -> bool {
        matches!(self, Encoding::Ascii)
    }

    /// Check if this encoding is binary.
    pub fn is_binary(&self) -> bool {
        matches!(self, Encoding::Binary)
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Binary => "binary",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_from_data_directive() {
        assert_eq!(Encoding::from_data_directive("ascii"), Some(Encoding::Ascii));
        assert_eq!(
            Encoding::from_data_directive("binary"),
            Some(Encoding::Binary)
        );
        assert_eq!(Encoding::from_data_directive("ASCII"), None);
        assert_eq!(Encoding::from_data_directive("lzf"), None);
        assert_eq!(Encoding::from_data_directive(""), None);
    }

    #[test]
    fn test_encoding_predicates() {
        assert!(Encoding::Ascii.is_ascii());
        assert!(!Encoding::Ascii.is_binary());
        assert!(Encoding::Binary.is_binary());
        assert_eq!(Encoding::Binary.to_string(), "binary");
    }
}
