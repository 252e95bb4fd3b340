// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field value type system.
//!
//! A PCD header describes every field with a type class letter (`I`, `U`,
//! `F`) and a byte size. The pair resolves to a [`LogicalType`], which owns
//! the bytes-to-number decode table. Decoded values are carried as a
//! [`FieldValue`] and converted to caller types through [`FromFieldValue`].

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::core::error::{PcdError, Result};

// =============================================================================
// Type Class
// =============================================================================

/// Numeric class declared by the TYPE directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeClass {
    /// `I`: signed integer
    Signed,
    /// `U`: unsigned integer
    Unsigned,
    /// `F`: floating point
    Float,
}

impl TypeClass {
    /// Parse a TYPE token. Only the exact letters `I`, `U` and `F` are accepted.
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "I" => Some(TypeClass::Signed),
            "U" => Some(TypeClass::Unsigned),
            "F" => Some(TypeClass::Float),
            _ => None,
        }
    }

    /// The header letter for this class.
    pub const fn letter(self) -> char {
        match self {
            TypeClass::Signed => 'I',
            TypeClass::Unsigned => 'U',
            TypeClass::Float => 'F',
        }
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// =============================================================================
// Logical Type
// =============================================================================

/// Resolved storage type of one field component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit IEEE-754 float
    Float32,
    /// 64-bit IEEE-754 float
    Float64,
}

impl LogicalType {
    /// Resolve a `(TYPE, SIZE)` pair. Returns `None` for pairs outside the table.
    pub const fn resolve(class: TypeClass, size: u32) -> Option<Self> {
        match (class, size) {
            (TypeClass::Signed, 1) => Some(LogicalType::Int8),
            (TypeClass::Signed, 2) => Some(LogicalType::Int16),
            (TypeClass::Signed, 4) => Some(LogicalType::Int32),
            (TypeClass::Signed, 8) => Some(LogicalType::Int64),
            (TypeClass::Unsigned, 1) => Some(LogicalType::UInt8),
            (TypeClass::Unsigned, 2) => Some(LogicalType::UInt16),
            (TypeClass::Unsigned, 4) => Some(LogicalType::UInt32),
            (TypeClass::Unsigned, 8) => Some(LogicalType::UInt64),
            (TypeClass::Float, 4) => Some(LogicalType::Float32),
            (TypeClass::Float, 8) => Some(LogicalType::Float64),
            _ => None,
        }
    }

    /// Size of one component in bytes.
    pub const fn size(self) -> usize {
        match self {
            LogicalType::Int8 | LogicalType::UInt8 => 1,
            LogicalType::Int16 | LogicalType::UInt16 => 2,
            LogicalType::Int32 | LogicalType::UInt32 | LogicalType::Float32 => 4,
            LogicalType::Int64 | LogicalType::UInt64 | LogicalType::Float64 => 8,
        }
    }

    /// Type class this logical type belongs to.
    pub const fn type_class(self) -> TypeClass {
        match self {
            LogicalType::Int8 | LogicalType::Int16 | LogicalType::Int32 | LogicalType::Int64 => {
                TypeClass::Signed
            }
            LogicalType::UInt8
            | LogicalType::UInt16
            | LogicalType::UInt32
            | LogicalType::UInt64 => TypeClass::Unsigned,
            LogicalType::Float32 | LogicalType::Float64 => TypeClass::Float,
        }
    }

    /// Decode one little-endian component from the front of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`PcdError::BufferTooShort`] if `bytes` is shorter than [`size`](Self::size).
    pub fn decode(self, bytes: &[u8]) -> Result<FieldValue> {
        let size = self.size();
        if bytes.len() < size {
            return Err(PcdError::buffer_too_short(size, bytes.len()));
        }
        let bytes = &bytes[..size];
        Ok(match self {
            LogicalType::Int8 => FieldValue::Int8(bytes[0] as i8),
            LogicalType::Int16 => FieldValue::Int16(LittleEndian::read_i16(bytes)),
            LogicalType::Int32 => FieldValue::Int32(LittleEndian::read_i32(bytes)),
            LogicalType::Int64 => FieldValue::Int64(LittleEndian::read_i64(bytes)),
            LogicalType::UInt8 => FieldValue::UInt8(bytes[0]),
            LogicalType::UInt16 => FieldValue::UInt16(LittleEndian::read_u16(bytes)),
            LogicalType::UInt32 => FieldValue::UInt32(LittleEndian::read_u32(bytes)),
            LogicalType::UInt64 => FieldValue::UInt64(LittleEndian::read_u64(bytes)),
            LogicalType::Float32 => FieldValue::Float32(LittleEndian::read_f32(bytes)),
            LogicalType::Float64 => FieldValue::Float64(LittleEndian::read_f64(bytes)),
        })
    }

    /// Parse one ASCII token for a field of this type.
    ///
    /// Integer fields keep integer precision; a token that is not a plain
    /// integer (`1.0`, `1e3`) falls back to a decimal parse.
    pub fn parse_text(self, text: &str) -> Option<FieldValue> {
        let parsed = match self.type_class() {
            TypeClass::Signed => text.parse::<i64>().ok().map(FieldValue::Int64),
            TypeClass::Unsigned => text.parse::<u64>().ok().map(FieldValue::UInt64),
            TypeClass::Float => None,
        };
        parsed.or_else(|| text.parse::<f64>().ok().map(FieldValue::Float64))
    }

    /// Get the type name as a string.
    pub const fn as_str(self) -> &'static str {
        match self {
            LogicalType::Int8 => "int8",
            LogicalType::Int16 => "int16",
            LogicalType::Int32 => "int32",
            LogicalType::Int64 => "int64",
            LogicalType::UInt8 => "uint8",
            LogicalType::UInt16 => "uint16",
            LogicalType::UInt32 => "uint32",
            LogicalType::UInt64 => "uint64",
            LogicalType::Float32 => "float32",
            LogicalType::Float64 => "float64",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Field Value
// =============================================================================

/// One decoded field component in its native type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// `int8` component
    Int8(i8),
    /// `int16` component
    Int16(i16),
    /// `int32` component
    Int32(i32),
    /// `int64` component, also used for ASCII tokens of signed fields
    Int64(i64),
    /// `uint8` component
    UInt8(u8),
    /// `uint16` component
    UInt16(u16),
    /// `uint32` component
    UInt32(u32),
    /// `uint64` component, also used for ASCII tokens of unsigned fields
    UInt64(u64),
    /// `float32` component
    Float32(f32),
    /// `float64` component, also used for ASCII tokens that are not integers
    Float64(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int8(v) => write!(f, "{v}"),
            FieldValue::Int16(v) => write!(f, "{v}"),
            FieldValue::Int32(v) => write!(f, "{v}"),
            FieldValue::Int64(v) => write!(f, "{v}"),
            FieldValue::UInt8(v) => write!(f, "{v}"),
            FieldValue::UInt16(v) => write!(f, "{v}"),
            FieldValue::UInt32(v) => write!(f, "{v}"),
            FieldValue::UInt64(v) => write!(f, "{v}"),
            FieldValue::Float32(v) => write!(f, "{v}"),
            FieldValue::Float64(v) => write!(f, "{v}"),
        }
    }
}

/// Numeric types a [`FieldValue`] can be converted into.
///
/// Conversion follows Rust `as` casts: integers wrap or truncate, floats
/// saturate when cast to integers. No overflow is reported.
pub trait FromFieldValue: Copy {
    /// Convert a decoded value.
    fn from_value(value: FieldValue) -> Self;
}

macro_rules! impl_from_field_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromFieldValue for $t {
                #[inline]
                fn from_value(value: FieldValue) -> Self {
                    match value {
                        FieldValue::Int8(v) => v as $t,
                        FieldValue::Int16(v) => v as $t,
                        FieldValue::Int32(v) => v as $t,
                        FieldValue::Int64(v) => v as $t,
                        FieldValue::UInt8(v) => v as $t,
                        FieldValue::UInt16(v) => v as $t,
                        FieldValue::UInt32(v) => v as $t,
                        FieldValue::UInt64(v) => v as $t,
                        FieldValue::Float32(v) => v as $t,
                        FieldValue::Float64(v) => v as $t,
                    }
                }
            }
        )*
    };
}

impl_from_field_value!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, isize, usize);

impl FromFieldValue for FieldValue {
    fn from_value(value: FieldValue) -> Self {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_table() {
        let table = [
            (TypeClass::Signed, 1, LogicalType::Int8),
            (TypeClass::Signed, 2, LogicalType::Int16),
            (TypeClass::Signed, 4, LogicalType::Int32),
            (TypeClass::Signed, 8, LogicalType::Int64),
            (TypeClass::Unsigned, 1, LogicalType::UInt8),
            (TypeClass::Unsigned, 2, LogicalType::UInt16),
            (TypeClass::Unsigned, 4, LogicalType::UInt32),
            (TypeClass::Unsigned, 8, LogicalType::UInt64),
            (TypeClass::Float, 4, LogicalType::Float32),
            (TypeClass::Float, 8, LogicalType::Float64),
        ];
        for (class, size, expected) in table {
            let resolved = LogicalType::resolve(class, size).unwrap();
            assert_eq!(resolved, expected);
            assert_eq!(resolved.size(), size as usize);
            assert_eq!(resolved.type_class(), class);
        }
    }

    #[test]
    fn test_resolve_rejects_pairs_outside_table() {
        assert_eq!(LogicalType::resolve(TypeClass::Float, 1), None);
        assert_eq!(LogicalType::resolve(TypeClass::Float, 2), None);
        assert_eq!(LogicalType::resolve(TypeClass::Signed, 3), None);
        assert_eq!(LogicalType::resolve(TypeClass::Unsigned, 16), None);
        assert_eq!(LogicalType::resolve(TypeClass::Signed, 0), None);
    }

    #[test]
    fn test_type_class_letters() {
        assert_eq!(TypeClass::from_letter("I"), Some(TypeClass::Signed));
        assert_eq!(TypeClass::from_letter("U"), Some(TypeClass::Unsigned));
        assert_eq!(TypeClass::from_letter("F"), Some(TypeClass::Float));
        assert_eq!(TypeClass::from_letter("f"), None);
        assert_eq!(TypeClass::from_letter("FF"), None);
        assert_eq!(TypeClass::Float.to_string(), "F");
    }

    #[test]
    fn test_decode_little_endian() {
        assert_eq!(
            LogicalType::Float32.decode(&2.5f32.to_le_bytes()).unwrap(),
            FieldValue::Float32(2.5)
        );
        assert_eq!(
            LogicalType::Int16.decode(&(-2i16).to_le_bytes()).unwrap(),
            FieldValue::Int16(-2)
        );
        assert_eq!(
            LogicalType::UInt32.decode(&[0x01, 0x00, 0x00, 0x80]).unwrap(),
            FieldValue::UInt32(0x8000_0001)
        );
        assert_eq!(
            LogicalType::Int8.decode(&[0xFF]).unwrap(),
            FieldValue::Int8(-1)
        );
        assert_eq!(
            LogicalType::Float64.decode(&(-0.125f64).to_le_bytes()).unwrap(),
            FieldValue::Float64(-0.125)
        );
    }

    #[test]
    fn test_decode_reads_only_leading_component() {
        let mut bytes = 7u16.to_le_bytes().to_vec();
        bytes.extend_from_slice(&9u16.to_le_bytes());
        assert_eq!(
            LogicalType::UInt16.decode(&bytes).unwrap(),
            FieldValue::UInt16(7)
        );
    }

    #[test]
    fn test_decode_short_buffer() {
        let err = LogicalType::Float64.decode(&[0u8; 5]).unwrap_err();
        assert_eq!(err, PcdError::buffer_too_short(8, 5));
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(
            LogicalType::Float32.parse_text("2.0"),
            Some(FieldValue::Float64(2.0))
        );
        assert_eq!(
            LogicalType::UInt64.parse_text("18446744073709551615"),
            Some(FieldValue::UInt64(u64::MAX))
        );
        assert_eq!(
            LogicalType::Int32.parse_text("-17"),
            Some(FieldValue::Int64(-17))
        );
        assert_eq!(
            LogicalType::Int32.parse_text("1.5"),
            Some(FieldValue::Float64(1.5))
        );
        assert_eq!(LogicalType::Float32.parse_text("nope"), None);
    }

    #[test]
    fn test_from_field_value_casts() {
        assert_eq!(i32::from_value(FieldValue::Float64(3.9)), 3);
        assert_eq!(u16::from_value(FieldValue::Int16(-1)), u16::MAX);
        assert_eq!(u8::from_value(FieldValue::UInt32(300)), 44);
        assert_eq!(f64::from_value(FieldValue::Float32(1.5)), 1.5);
        assert_eq!(i64::from_value(FieldValue::Float64(-1e30)), i64::MIN);
        assert_eq!(
            FieldValue::from_value(FieldValue::UInt8(7)),
            FieldValue::UInt8(7)
        );
    }

    #[test]
    fn test_logical_type_names() {
        assert_eq!(LogicalType::UInt16.to_string(), "uint16");
        assert_eq!(LogicalType::Float64.as_str(), "float64");
        assert_eq!(TypeClass::Unsigned.to_string(), "U");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LogicalType::Float32).unwrap();
        assert_eq!(json, "\"float32\"");
        let value = FieldValue::Int32(42);
        let encoded = serde_json::to_string(&value).unwrap();
        let decoded: FieldValue = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, value);
    }
}
