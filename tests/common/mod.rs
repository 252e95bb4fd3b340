// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

// ============================================================================
// Header Builders
// ============================================================================

/// One FIELDS entry: name, SIZE, TYPE letter, COUNT.
pub type FieldSpec<'a> = (&'a str, u32, &'a str, u32);

/// The `x y z` float32 layout used by most fixtures.
pub const XYZ: &[FieldSpec<'static>] = &[("x", 4, "F", 1), ("y", 4, "F", 1), ("z", 4, "F", 1)];

/// Build a complete header ending with the DATA line.
pub fn header(fields: &[FieldSpec<'_>], points: usize, data: &str) -> String {
    let names: Vec<&str> = fields.iter().map(|f| f.0).collect();
    let sizes: Vec<String> = fields.iter().map(|f| f.1.to_string()).collect();
    let types: Vec<&str> = fields.iter().map(|f| f.2).collect();
    let counts: Vec<String> = fields.iter().map(|f| f.3.to_string()).collect();

    format!(
        "# .PCD v0.7 - Point Cloud Data file format\n\
         VERSION 0.7\n\
         FIELDS {}\n\
         SIZE {}\n\
         TYPE {}\n\
         COUNT {}\n\
         WIDTH {points}\n\
         HEIGHT 1\n\
         VIEWPOINT 0 0 0 1 0 0 0\n\
         POINTS {points}\n\
         DATA {data}\n",
        names.join(" "),
        sizes.join(" "),
        types.join(" "),
        counts.join(" "),
    )
}

// ============================================================================
// XYZ Fixtures
// ============================================================================

/// Deterministic xyz samples; every value is exactly representable.
pub fn sample_points(n: usize) -> Vec<[f32; 3]> {
    (0..n)
        .map(|i| {
            let i = i as f32;
            [i * 0.5, -i * 0.25, 100.0 + i]
        })
        .collect()
}

/// ASCII PCD bytes for xyz points.
pub fn xyz_ascii(points: &[[f32; 3]]) -> Vec<u8> {
    let mut bytes = header(XYZ, points.len(), "ascii").into_bytes();
    for [x, y, z] in points {
        bytes.extend_from_slice(format!("{x} {y} {z}\n").as_bytes());
    }
    bytes
}

/// Binary PCD bytes for xyz points.
pub fn xyz_binary(points: &[[f32; 3]]) -> Vec<u8> {
    let mut bytes = header(XYZ, points.len(), "binary").into_bytes();
    for point in points {
        for v in point {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
    }
    bytes
}

// ============================================================================
// Files
// ============================================================================

/// Write bytes to a temporary `.pcd` file that lives as long as the handle.
pub fn write_fixture(bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".pcd")
        .tempfile()
        .expect("create temp file");
    file.write_all(bytes).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

/// Path of a fixture as a `&str`, for CLI arguments.
pub fn path_str(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("temp path is UTF-8")
}

// ============================================================================
// Assertions
// ============================================================================

/// Assert two floats are equal within `f32` precision.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
