//! Type-safe wrappers for scaffolding operations.
//!
//! Security-relevant types are validated upon construction and have no
//! `From<RawType>` implementations.

pub mod dest_dir;
pub mod entry_type;
pub mod project_name;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use entry_type::EntryType;
pub use project_name::ProjectName;
pub use safe_path::SafePath;
