//! Placeholder rewriting.
//!
//! Selection ([`RewritePolicy`]) and substitution ([`replace_literal`]) are
//! independent of each other and of the extraction pass.

pub mod policy;
pub mod substitute;
pub mod walker;

pub use policy::RewritePolicy;
pub use substitute::replace_literal;
pub use walker::rewrite_file;
pub use walker::rewrite_tree;
