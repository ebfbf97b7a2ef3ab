//! Selection of rewrite targets by file name.

use std::ffi::OsStr;

/// Decides which files get placeholder substitution.
///
/// A file is a target when its name ends with one of `suffixes` or equals
/// one of `manifest_names`. Matching is case-sensitive.
///
/// # Examples
///
/// ```
/// use gocanon_core::RewritePolicy;
/// use std::ffi::OsStr;
///
/// let policy = RewritePolicy::default();
/// assert!(policy.is_target(OsStr::new("main.go")));
/// assert!(policy.is_target(OsStr::new("go.mod")));
/// assert!(!policy.is_target(OsStr::new("go.sum")));
/// assert!(!policy.is_target(OsStr::new("logo.png")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePolicy {
    /// File name suffixes, e.g. `.go`.
    pub suffixes: Vec<String>,

    /// Exact file names, e.g. `go.mod`.
    pub manifest_names: Vec<String>,
}

impl Default for RewritePolicy {
    /// Go source files and the module manifest.
    fn default() -> Self {
        Self {
            suffixes: vec![".go".to_string()],
            manifest_names: vec!["go.mod".to_string()],
        }
    }
}

impl RewritePolicy {
    /// Adds a file name suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }

    /// Adds an exact file name.
    #[must_use]
    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_names.push(name.into());
        self
    }

    /// Returns `true` if a file called `file_name` should be rewritten.
    ///
    /// Non-UTF-8 names are matched lossily.
    #[must_use]
    pub fn is_target(&self, file_name: &OsStr) -> bool {
        let name = file_name.to_string_lossy();
        self.manifest_names.iter().any(|m| *m == name)
            || self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}
