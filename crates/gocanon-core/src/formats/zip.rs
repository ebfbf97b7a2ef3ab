//! ZIP template archive reader.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;

use crate::EntryType;
use crate::Result;
use crate::ScaffoldError;

/// Permission bits kept from an entry's unix mode. File type, setuid,
/// setgid and sticky bits are dropped.
const PERMISSION_MASK: u32 = 0o777;

/// Metadata of one archive entry, read from the central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    /// Position in the archive's stored order.
    pub index: usize,
    /// Path exactly as stored in the archive.
    pub stored_path: PathBuf,
    /// File or directory.
    pub entry_type: EntryType,
    /// Unix permission bits, if the archive records them.
    pub mode: Option<u32>,
    /// Uncompressed size in bytes.
    pub size: u64,
}

/// A zip template opened for random access.
///
/// # Examples
///
/// ```no_run
/// use gocanon_core::formats::TemplateArchive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut archive = TemplateArchive::open("go-canonical.zip")?;
/// archive.for_each_entry(|header, _content| {
///     println!("{}", header.stored_path.display());
///     Ok(())
/// })?;
/// # Ok(())
/// # }
/// ```
pub struct TemplateArchive<R = BufReader<File>> {
    path: PathBuf,
    inner: ::zip::ZipArchive<R>,
}

impl TemplateArchive {
    /// Opens a zip archive from disk.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::ArchiveOpen` if the file cannot be opened or
    /// its central directory cannot be parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScaffoldError::ArchiveOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_reader(path, BufReader::new(file))
    }
}

impl<R: Read + Seek> TemplateArchive<R> {
    /// Reads the central directory from an arbitrary seekable reader.
    ///
    /// `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::ArchiveOpen` if the central directory cannot
    /// be parsed.
    pub fn from_reader(path: &Path, reader: R) -> Result<Self> {
        let inner = ::zip::ZipArchive::new(reader).map_err(|e| ScaffoldError::ArchiveOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    /// Number of entries in the central directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Visits every entry in stored order.
    ///
    /// The content reader handed to `visit` yields decompressed bytes and is
    /// dropped before the next entry is opened. Directory entries get an
    /// empty stream. The first error returned by `visit` stops the
    /// iteration.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::InvalidArchive` if an entry header cannot be
    /// read, or whatever `visit` returns.
    pub fn for_each_entry<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&EntryHeader, &mut dyn Read) -> Result<()>,
    {
        for index in 0..self.inner.len() {
            let mut file = self.inner.by_index(index).map_err(|e| {
                ScaffoldError::InvalidArchive(format!("entry {index}: {e}"))
            })?;

            let header = EntryHeader {
                index,
                stored_path: PathBuf::from(file.name()),
                entry_type: if file.is_dir() {
                    EntryType::Directory
                } else {
                    EntryType::File
                },
                mode: file.unix_mode().map(|mode| mode & PERMISSION_MASK),
                size: file.size(),
            };

            visit(&header, &mut file)?;
        }

        Ok(())
    }
}

impl<R> std::fmt::Debug for TemplateArchive<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateArchive")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
