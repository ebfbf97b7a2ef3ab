//! Template root stripping.

use std::ffi::OsStr;
use std::path::Component;
use std::path::Path;

/// Strips the template root folder from stored archive paths.
///
/// Only a leading path component exactly equal to the root is removed.
/// Paths that do not start with it are returned unchanged, so a stray entry
/// never fails the run by itself; containment is checked afterwards by
/// [`SafePath`](crate::SafePath).
///
/// # Examples
///
/// ```
/// use gocanon_core::extraction::RootRemap;
/// use std::path::Path;
///
/// let remap = RootRemap::new("go-canonical");
/// assert_eq!(remap.strip(Path::new("go-canonical/cmd/main.go")), Path::new("cmd/main.go"));
/// assert_eq!(remap.strip(Path::new("README.md")), Path::new("README.md"));
/// assert_eq!(remap.strip(Path::new("go-canonical-extra/x")), Path::new("go-canonical-extra/x"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RootRemap<'a> {
    root: &'a OsStr,
}

impl<'a> RootRemap<'a> {
    /// Creates a remap for the given root folder name.
    #[must_use]
    pub fn new(root: &'a str) -> Self {
        Self {
            root: OsStr::new(root),
        }
    }

    /// Returns `stored` without its leading root component.
    ///
    /// The root is only stripped when something follows it, so an entry
    /// named exactly like the root comes back unchanged.
    #[must_use]
    pub fn strip<'p>(&self, stored: &'p Path) -> &'p Path {
        let mut components = stored.components();
        match components.next() {
            Some(Component::Normal(first)) if first == self.root => {
                let rest = components.as_path();
                if rest.components().any(|c| matches!(c, Component::Normal(_))) {
                    rest
                } else {
                    stored
                }
            }
            _ => stored,
        }
    }

    /// Returns `true` if `stored` names the root folder itself.
    #[must_use]
    pub fn is_root(&self, stored: &Path) -> bool {
        let mut components = stored.components();
        matches!(
            components.next(),
            Some(Component::Normal(first)) if first == self.root
        ) && components.all(|c| matches!(c, Component::CurDir))
    }
}
