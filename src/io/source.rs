// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Owned byte source for a PCD file.
//!
//! The `ByteSource` owns the file contents, either memory-mapped or read
//! into a buffer, and hands out slices tied to its own lifetime.
//!
//! # Ownership Model
//!
//! ```text
//! ByteSource (owns mmap or Vec<u8>)
//!   ↓
//! PcdReader (owns the source)
//!   ↓
//! Point / RecordCursor (borrow from the reader)
//! ```

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use tracing::debug;

use crate::io::reader::LoadStrategy;
use crate::PcdError;

enum Backing {
    Mapped(memmap2::Mmap),
    Buffered(Vec<u8>),
}

/// The full contents of one file, immutable for the source's lifetime.
pub struct ByteSource {
    backing: Backing,
    /// File path for diagnostics (empty for in-memory sources)
    path: String,
}

impl ByteSource {
    /// Open a file using the given load strategy.
    ///
    /// # Errors
    ///
    /// Returns [`PcdError::Io`] if the file cannot be opened, stat'ed,
    /// mapped (for [`LoadStrategy::Mmap`]) or read.
    pub fn open<P: AsRef<Path>>(path: P, strategy: LoadStrategy) -> Result<Self, PcdError> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        let file = File::open(path_ref).map_err(|e| {
            PcdError::io("ByteSource::open", format!("Failed to open file '{path_str}': {e}"))
        })?;

        let file_len = file
            .metadata()
            .map_err(|e| {
                PcdError::io(
                    "ByteSource::open",
                    format!("Failed to get metadata for '{path_str}': {e}"),
                )
            })?
            .len();

        // Zero-length files cannot be mapped on every platform.
        if strategy.tries_mmap() && (file_len > 0 || !strategy.allows_buffered()) {
            // The map is read-only and owned by the source; slices handed out
            // are bounded by the source's lifetime.
            match unsafe { memmap2::Mmap::map(&file) } {
                Ok(mmap) => {
                    debug!(
                        context = "byte_source",
                        path = %path_str,
                        len = mmap.len(),
                        "Mapped file"
                    );
                    return Ok(Self {
                        backing: Backing::Mapped(mmap),
                        path: path_str,
                    });
                }
                Err(e) if !strategy.allows_buffered() => {
                    return Err(PcdError::io(
                        "ByteSource::open",
                        format!("Failed to mmap file '{path_str}': {e}"),
                    ));
                }
                Err(e) => {
                    debug!(
                        context = "byte_source",
                        path = %path_str,
                        error = %e,
                        "Mapping failed, falling back to buffered read"
                    );
                }
            }
        }

        let buf = read_all(file, file_len).map_err(|e| {
            PcdError::io("ByteSource::open", format!("Failed to read file '{path_str}': {e}"))
        })?;
        debug!(
            context = "byte_source",
            path = %path_str,
            len = buf.len(),
            "Read file into memory"
        );

        Ok(Self {
            backing: Backing::Buffered(buf),
            path: path_str,
        })
    }

    /// Wrap an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            backing: Backing::Buffered(bytes),
            path: String::new(),
        }
    }

    /// Get the file path (empty for in-memory sources).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the full contents.
    pub fn data(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(mmap) => &mmap[..],
            Backing::Buffered(buf) => &buf[..],
        }
    }

    /// Get the length of the data.
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Check if the source is empty.
    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// Whether the contents are memory-mapped rather than buffered.
    pub fn is_mapped(&self) -> bool {
        matches!(self.backing, Backing::Mapped(_))
    }
}

fn read_all(mut file: File, len_hint: u64) -> std::io::Result<Vec<u8>> {
    use std::io::Read;

    let mut buf = Vec::with_capacity(usize::try_from(len_hint).unwrap_or(0));
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

impl Deref for ByteSource {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.data()
    }
}

impl AsRef<[u8]> for ByteSource {
    fn as_ref(&self) -> &[u8] {
        self.data()
    }
}

impl std::fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteSource")
            .field("path", &self.path)
            .field("len", &self.len())
            .field("mapped", &self.is_mapped())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(data: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_open_mapped() {
        let file = temp_file(b"hello world");
        let source = ByteSource::open(file.path(), LoadStrategy::Mmap).unwrap();
        assert!(source.is_mapped());
        assert_eq!(source.data(), b"hello world");
        assert_eq!(source.len(), 11);
    }

    #[test]
    fn test_open_buffered() {
        let file = temp_file(b"hello world");
        let source = ByteSource::open(file.path(), LoadStrategy::Buffered).unwrap();
        assert!(!source.is_mapped());
        assert_eq!(source.data(), b"hello world");
    }

    #[test]
    fn test_strategies_expose_same_bytes() {
        let file = temp_file(b"VERSION 0.7\nDATA ascii\n");
        let mapped = ByteSource::open(file.path(), LoadStrategy::Mmap).unwrap();
        let buffered = ByteSource::open(file.path(), LoadStrategy::Buffered).unwrap();
        let auto = ByteSource::open(file.path(), LoadStrategy::Auto).unwrap();
        assert_eq!(mapped.data(), buffered.data());
        assert_eq!(auto.data(), buffered.data());
    }

    #[test]
    fn test_auto_empty_file_is_buffered() {
        let file = temp_file(b"");
        let source = ByteSource::open(file.path(), LoadStrategy::Auto).unwrap();
        assert!(source.is_empty());
        assert!(!source.is_mapped());
    }

    #[test]
    fn test_open_missing_file() {
        let err = ByteSource::open("/nonexistent/pcdview/missing.pcd", LoadStrategy::Auto)
            .unwrap_err();
        assert!(matches!(err, PcdError::Io { .. }));
    }

    #[test]
    fn test_from_bytes() {
        let source = ByteSource::from_bytes(b"abc".to_vec());
        assert_eq!(&*source, b"abc");
        assert_eq!(source.path(), "");
        assert_eq!(source.first(), Some(&b'a'));
    }
}
