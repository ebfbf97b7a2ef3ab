//! Scaffolding configuration.

use std::path::Component;
use std::path::Path;

use crate::Result;
use crate::ScaffoldError;
use crate::rewrite::RewritePolicy;

/// Name of the top-level folder inside the bundled template archive.
pub const DEFAULT_TEMPLATE_ROOT: &str = "go-canonical";

/// Literal token replaced by the project name inside text files.
pub const DEFAULT_PLACEHOLDER: &str = "go-canonical";

/// File name of the bundled template archive.
pub const DEFAULT_ARCHIVE_NAME: &str = "go-canonical.zip";

/// What to do with an archive entry that would land outside the project root.
///
/// Nothing is ever written outside the root; the policy only decides whether
/// the whole run fails or the entry is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsafeEntryPolicy {
    /// Fail the run with `ScaffoldError::PathTraversal`.
    #[default]
    Abort,
    /// Skip the entry and record a warning in the report.
    Skip,
}

/// Configuration for [`scaffold`](crate::scaffold).
///
/// # Examples
///
/// ```
/// use gocanon_core::ScaffoldConfig;
/// use gocanon_core::UnsafeEntryPolicy;
///
/// let config = ScaffoldConfig::default()
///     .with_unsafe_entries(UnsafeEntryPolicy::Skip)
///     .with_staged(true);
/// assert_eq!(config.template_root, "go-canonical");
/// assert!(config.staged);
/// ```
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    /// Top-level folder stripped from every stored path.
    pub template_root: String,

    /// Token replaced by the project name in rewrite targets.
    pub placeholder: String,

    /// Which files the rewrite pass touches.
    pub rewrite_policy: RewritePolicy,

    /// Handling of entries escaping the project root.
    pub unsafe_entries: UnsafeEntryPolicy,

    /// Apply the unix mode recorded in the archive to extracted files.
    pub preserve_permissions: bool,

    /// Extract into a staging directory and rename into place on success.
    pub staged: bool,

    /// Maximum number of archive entries processed.
    pub max_entries: usize,
}

impl Default for ScaffoldConfig {
    /// Default values:
    /// - `template_root`, `placeholder`: `go-canonical`
    /// - `rewrite_policy`: `*.go` files and `go.mod`
    /// - `unsafe_entries`: abort
    /// - `preserve_permissions`: true
    /// - `staged`: false
    /// - `max_entries`: 10,000
    fn default() -> Self {
        Self {
            template_root: DEFAULT_TEMPLATE_ROOT.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            rewrite_policy: RewritePolicy::default(),
            unsafe_entries: UnsafeEntryPolicy::default(),
            preserve_permissions: true,
            staged: false,
            max_entries: 10_000,
        }
    }
}

impl ScaffoldConfig {
    /// Sets the template root folder name.
    #[must_use]
    pub fn with_template_root(mut self, root: impl Into<String>) -> Self {
        self.template_root = root.into();
        self
    }

    /// Sets the placeholder token.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the rewrite policy.
    #[must_use]
    pub fn with_rewrite_policy(mut self, policy: RewritePolicy) -> Self {
        self.rewrite_policy = policy;
        self
    }

    /// Sets the unsafe entry policy.
    #[must_use]
    pub const fn with_unsafe_entries(mut self, policy: UnsafeEntryPolicy) -> Self {
        self.unsafe_entries = policy;
        self
    }

    /// Enables or disables permission preservation.
    #[must_use]
    pub const fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Enables or disables staged extraction.
    #[must_use]
    pub const fn with_staged(mut self, staged: bool) -> Self {
        self.staged = staged;
        self
    }

    /// Sets the entry limit.
    #[must_use]
    pub const fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Checks that the configuration can drive a run.
    ///
    /// The template root must be a single normal path segment, the
    /// placeholder must be non-empty and the entry limit positive.
    pub fn validate(&self) -> Result<()> {
        let mut components = Path::new(&self.template_root).components();
        let single_segment = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_segment {
            return Err(ScaffoldError::InvalidConfig {
                reason: format!(
                    "template root must be a single folder name, got {:?}",
                    self.template_root
                ),
            });
        }

        if self.placeholder.is_empty() {
            return Err(ScaffoldError::InvalidConfig {
                reason: "placeholder token must not be empty".to_string(),
            });
        }

        if self.max_entries == 0 {
            return Err(ScaffoldError::InvalidConfig {
                reason: "max_entries must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScaffoldConfig::default();
        assert_eq!(config.template_root, DEFAULT_TEMPLATE_ROOT);
        assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(config.unsafe_entries, UnsafeEntryPolicy::Abort);
        assert!(config.preserve_permissions);
        assert!(!config.staged);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ScaffoldConfig::default()
            .with_template_root("rust-canonical")
            .with_placeholder("RUST_NAME")
            .with_preserve_permissions(false)
            .with_max_entries(5);
        assert_eq!(config.template_root, "rust-canonical");
        assert_eq!(config.placeholder, "RUST_NAME");
        assert!(!config.preserve_permissions);
        assert_eq!(config.max_entries, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nested_template_root() {
        for root in ["a/b", "..", ".", "", "/abs"] {
            let config = ScaffoldConfig::default().with_template_root(root);
            assert!(
                matches!(config.validate(), Err(ScaffoldError::InvalidConfig { .. })),
                "root should be rejected: {root:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_empty_placeholder() {
        let config = ScaffoldConfig::default().with_placeholder("");
        assert!(matches!(
            config.validate(),
            Err(ScaffoldError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_entries() {
        let config = ScaffoldConfig::default().with_max_entries(0);
        assert!(config.validate().is_err());
    }
}
