//! Template archive formats.

pub mod zip;

pub use zip::EntryHeader;
pub use zip::TemplateArchive;
