//! Archive entry type enumeration.

/// Type of an entry in the template archive.
///
/// Zip symlink entries carry their target as file content; they are
/// materialized as regular files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,
}

impl EntryType {
    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}
