// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating PCD readers.
//!
//! The `ReaderBuilder` provides a fluent API for configuring and opening
//! readers.

use std::path::PathBuf;

use crate::io::source::ByteSource;
use crate::{PcdError, Result};

use super::strategy::LoadStrategy;
use super::PcdReader;

/// Configuration for creating a reader.
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Path to the file to read
    pub path: PathBuf,
    /// How the file bytes are loaded
    pub load_strategy: LoadStrategy,
}

/// Builder for creating PCD readers.
///
/// # Example
///
/// ```rust,no_run
/// use pcdview::io::{LoadStrategy, ReaderBuilder};
///
/// // Default: memory-map with buffered fallback
/// let reader = ReaderBuilder::new()
///     .path("cloud.pcd")
///     .build()?;
///
/// // Force a buffered read
/// let reader = ReaderBuilder::new()
///     .path("cloud.pcd")
///     .load_strategy(LoadStrategy::Buffered)
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReaderBuilder {
    config: ReaderConfig,
}

impl ReaderBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the file.
    pub fn path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config.path = path.as_ref().to_path_buf();
        self
    }

    /// Set how the file bytes are loaded.
    pub fn load_strategy(mut self, strategy: LoadStrategy) -> Self {
        self.config.load_strategy = strategy;
        self
    }

    /// Get the configuration built so far.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Open the file and parse its header.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is not set or the file cannot be loaded ([`PcdError::Io`])
    /// - The header is invalid or a binary data region has the wrong size
    pub fn build(self) -> Result<PcdReader> {
        let path = &self.config.path;

        if path.as_os_str().is_empty() {
            return Err(PcdError::io("ReaderBuilder", "Path is not set"));
        }

        let source = ByteSource::open(path, self.config.load_strategy)?;
        PcdReader::from_source(source)
    }
}
