//! Test utilities for building template archives.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;

/// Builder for template archives with files, directories and symlinks.
///
/// Entry names are written exactly as given, including `..` segments and
/// absolute paths.
///
/// # Examples
///
/// ```
/// use gocanon_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("go-canonical/")
///     .add_file("go-canonical/go.mod", b"module go-canonical")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file with mode 0o644.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(mode);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory to the archive.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Adds a symlink entry whose content is the link target.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        // ZIP stores symlinks as files with the Unix symlink mode bit set
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o120_777);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(target.as_bytes()).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    /// Builds the archive and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_to(self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.build())
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_builder_keeps_raw_names() {
        let zip_data = ZipTestBuilder::new()
            .add_directory("go-canonical/")
            .add_file("go-canonical/../evil.go", b"x")
            .build();
        let archive = zip::ZipArchive::new(Cursor::new(zip_data)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"go-canonical/../evil.go"));
        assert_eq!(archive.len(), 2);
    }
}
