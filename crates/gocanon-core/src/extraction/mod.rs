//! Template extraction: root remapping, entry materialization and staged
//! extraction.

pub mod atomic;
pub mod engine;
pub mod remap;

pub use atomic::staged_extract;
pub use engine::Extractor;
pub use remap::RootRemap;
