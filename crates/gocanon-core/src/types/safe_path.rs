//! Validated safe path type for template extraction.

use crate::Result;
use crate::ScaffoldError;
use std::borrow::Cow;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// A relative path that resolves inside a destination directory.
///
/// `SafePath` rejects:
/// - parent directory segments (`..`)
/// - absolute paths, roots and drive prefixes
/// - null bytes
/// - empty paths
///
/// `.` segments are dropped during normalization.
///
/// # Security Properties
///
/// - Can ONLY be constructed through validation
/// - NO `From<PathBuf>` implementation
/// - Existing parents are canonicalized so a symlinked directory cannot
///   redirect writes outside the destination
/// - A dangling symlink at the leaf is rejected since creating the file
///   would follow it
///
/// # Examples
///
/// ```no_run
/// use gocanon_core::DestDir;
/// use gocanon_core::SafePath;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp/widget")?;
///
/// let safe = SafePath::validate(Path::new("cmd/main.go"), &dest)?;
/// assert!(SafePath::validate(Path::new("../etc/passwd"), &dest).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates and constructs a `SafePath`.
    ///
    /// # Validation Steps
    ///
    /// 1. Reject null bytes
    /// 2. Reject `..`, root and prefix components
    /// 3. Drop `.` components
    /// 4. Reject paths with no remaining component
    /// 5. Verify the resolved path (and its existing parent chain, after
    ///    canonicalization) stays within `dest`
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::PathTraversal` if any step fails, or
    /// `ScaffoldError::Io` if canonicalization fails for a reason other than
    /// the path not existing yet.
    pub fn validate(path: &Path, dest: &DestDir) -> Result<Self> {
        if has_null_bytes(path) {
            return Err(traversal(path));
        }

        let mut normalized = PathBuf::new();
        let mut needs_normalization = false;
        let mut depth = 0usize;

        for component in path.components() {
            match component {
                Component::Normal(_) => {
                    depth += 1;
                    normalized.push(component);
                }
                Component::CurDir => needs_normalization = true,
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(traversal(path));
                }
            }
        }

        if depth == 0 {
            return Err(traversal(path));
        }

        let final_path = if needs_normalization {
            Cow::Owned(normalized)
        } else {
            Cow::Borrowed(path)
        };

        let resolved = dest.as_path().join(final_path.as_ref());

        // Walk up to the deepest existing ancestor and make sure it resolves
        // inside the destination once symlinks are followed.
        let mut ancestor = resolved.parent();
        while let Some(candidate) = ancestor {
            match candidate.canonicalize() {
                Ok(canonical) => {
                    if !canonical.starts_with(dest.as_path()) {
                        return Err(traversal(path));
                    }
                    break;
                }
                Err(e) if is_missing(&e) => {
                    ancestor = candidate.parent();
                }
                Err(e) => {
                    return Err(ScaffoldError::Io(std::io::Error::new(
                        e.kind(),
                        format!("failed to canonicalize parent: {e}"),
                    )));
                }
            }
        }

        match resolved.canonicalize() {
            Ok(canonical) => {
                if !canonical.starts_with(dest.as_path()) {
                    return Err(traversal(path));
                }
            }
            Err(e) if is_missing(&e) => {
                // A dangling link at the leaf would be followed on create.
                if is_symlink(&resolved) || !resolved.starts_with(dest.as_path()) {
                    return Err(traversal(path));
                }
            }
            Err(e) => {
                return Err(ScaffoldError::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to canonicalize path: {e}"),
                )));
            }
        }

        Ok(Self(final_path.into_owned()))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

}

fn traversal(path: &Path) -> ScaffoldError {
    ScaffoldError::PathTraversal {
        path: path.to_path_buf(),
    }
}

fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .is_ok_and(|meta| meta.file_type().is_symlink())
}

/// A path that does not exist yet, or that runs through a regular file.
/// The latter surfaces later as a directory creation failure.
fn is_missing(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
    )
}

/// Checks if a path contains null bytes.
#[cfg(unix)]
fn has_null_bytes(path: &Path) -> bool {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().contains(&b'\0')
}

/// Checks if a path contains null bytes.
#[cfg(not(unix))]
fn has_null_bytes(path: &Path) -> bool {
    path.to_str().is_none_or(|s| s.contains('\0'))
}
