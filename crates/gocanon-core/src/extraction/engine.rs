//! Core extraction engine.

use std::fs::create_dir_all;
use std::fs::remove_file;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;
use crate::ScaffoldConfig;
use crate::ScaffoldError;
use crate::UnsafeEntryPolicy;
use crate::copy::CopyBuffer;
use crate::copy::copy_to_file;
use crate::formats::EntryHeader;
use crate::formats::TemplateArchive;
use crate::types::DestDir;
use crate::types::EntryType;
use crate::types::ProjectName;
use crate::types::SafePath;

use super::RootRemap;

/// Materializes a template archive under `base/project_name`.
///
/// Entries are processed in stored order. Parent directories are derived
/// from each file's destination, so archives listing files before their
/// directories extract correctly.
pub struct Extractor<'a> {
    config: &'a ScaffoldConfig,
    copy_buffer: CopyBuffer,
}

impl<'a> Extractor<'a> {
    /// Creates a new extractor with the given configuration.
    #[must_use]
    pub fn new(config: &'a ScaffoldConfig) -> Self {
        Self {
            config,
            copy_buffer: CopyBuffer::new(),
        }
    }

    /// Extracts every entry of `archive` into `base/project_name`.
    ///
    /// # Errors
    ///
    /// - `TooManyEntries` if the archive exceeds `max_entries`
    /// - `PathTraversal` for an escaping entry under `UnsafeEntryPolicy::Abort`
    /// - `DirectoryCreate` / `Copy` for filesystem failures
    /// - `InvalidArchive` if an entry header is unreadable
    ///
    /// Nothing is rolled back on failure.
    pub fn extract<R: Read + Seek>(
        &mut self,
        archive: &mut TemplateArchive<R>,
        base: &DestDir,
        project_name: &ProjectName,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let config = self.config;
        let total = archive.len();
        if total > config.max_entries {
            return Err(ScaffoldError::TooManyEntries {
                count: total,
                max: config.max_entries,
            });
        }

        let root = base.create_child(project_name.as_str())?;
        let remap = RootRemap::new(&config.template_root);
        let mut report = ExtractionReport::new();

        archive.for_each_entry(|header, content| {
            progress.on_entry_start(&header.stored_path, total, header.index + 1);
            self.extract_entry(header, content, &root, remap, &mut report, progress)?;
            progress.on_entry_complete(&header.stored_path);
            Ok(())
        })?;

        Ok(report)
    }

    fn extract_entry(
        &mut self,
        header: &EntryHeader,
        content: &mut dyn Read,
        root: &DestDir,
        remap: RootRemap<'_>,
        report: &mut ExtractionReport,
        progress: &mut dyn ProgressCallback,
    ) -> Result<()> {
        // The template root entry itself maps onto the project root, which
        // already exists.
        if header.entry_type.is_directory() && remap.is_root(&header.stored_path) {
            return Ok(());
        }

        let stripped = remap.strip(&header.stored_path);

        let safe_path = match SafePath::validate(stripped, root) {
            Ok(safe_path) => safe_path,
            Err(ScaffoldError::PathTraversal { .. }) => {
                let err = ScaffoldError::PathTraversal {
                    path: header.stored_path.clone(),
                };
                return self.reject_entry(err, report);
            }
            Err(e) => return Err(e),
        };

        let destination = root.join(&safe_path);

        match header.entry_type {
            EntryType::Directory => {
                create_dir_all(&destination).map_err(|source| {
                    ScaffoldError::DirectoryCreate {
                        path: destination.clone(),
                        source,
                    }
                })?;
                report.directories_created += 1;
            }
            EntryType::File => {
                if let Some(parent) = destination.parent() {
                    create_dir_all(parent).map_err(|source| ScaffoldError::DirectoryCreate {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }

                replace_symlink(&destination)?;

                let mode = self.config.preserve_permissions.then_some(header.mode).flatten();
                let written = copy_to_file(content, &destination, mode, &mut self.copy_buffer)
                    .map_err(|source| ScaffoldError::Copy {
                        path: destination.clone(),
                        source,
                    })?;

                report.files_extracted += 1;
                report.bytes_written += written;
                progress.on_bytes_written(written);
            }
        }

        Ok(())
    }

    fn reject_entry(&self, err: ScaffoldError, report: &mut ExtractionReport) -> Result<()> {
        match self.config.unsafe_entries {
            UnsafeEntryPolicy::Abort => Err(err),
            UnsafeEntryPolicy::Skip => {
                report.entries_skipped += 1;
                report.add_warning(format!("skipped entry: {err}"));
                Ok(())
            }
        }
    }
}

/// Removes a symlink left at `destination` so the entry lands as a regular
/// file inside the project instead of wherever the link points.
fn replace_symlink(destination: &Path) -> Result<()> {
    let is_symlink = destination
        .symlink_metadata()
        .is_ok_and(|meta| meta.file_type().is_symlink());
    if is_symlink {
        remove_file(destination).map_err(|source| ScaffoldError::Copy {
            path: destination.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
