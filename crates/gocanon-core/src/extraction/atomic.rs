//! Staged extraction.
//!
//! The project is generated inside a hidden staging directory next to its
//! final location and renamed into place only after every pass succeeded.
//! Both directories live under the same output base, so the rename stays on
//! one filesystem.

use std::fs;

use crate::Result;
use crate::ScaffoldError;
use crate::types::DestDir;
use crate::types::ProjectName;

/// Prefix of staging directories created under the output base.
const STAGING_PREFIX: &str = ".gocanon-staging-";

/// Runs `generate` against a staging base and moves `staging/project_name`
/// to `base/project_name` on success.
///
/// The staging directory is removed on every outcome. On failure nothing is
/// left at the final location.
///
/// # Errors
///
/// - `DestinationExists` if `base/project_name` already exists
/// - `DirectoryCreate` if the staging directory cannot be created or the
///   final rename fails
/// - any error returned by `generate`
pub fn staged_extract<T, F>(base: &DestDir, project_name: &ProjectName, generate: F) -> Result<T>
where
    F: FnOnce(&DestDir) -> Result<T>,
{
    let final_path = base.join_path(project_name.as_ref());
    if fs::symlink_metadata(&final_path).is_ok() {
        return Err(ScaffoldError::DestinationExists { path: final_path });
    }

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(base.as_path())
        .map_err(|source| ScaffoldError::DirectoryCreate {
            path: base.as_path().to_path_buf(),
            source,
        })?;
    let staging_base = DestDir::new(staging.path())?;

    let value = generate(&staging_base)?;

    let staged_root = staging_base.join_path(project_name.as_ref());
    fs::rename(&staged_root, &final_path).map_err(|source| ScaffoldError::DirectoryCreate {
        path: final_path.clone(),
        source,
    })?;

    // The now empty staging directory is removed when `staging` drops.
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn staging_dirs(base: &DestDir) -> usize {
        fs::read_dir(base.as_path())
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(STAGING_PREFIX))
            .count()
    }

    #[test]
    fn test_success_moves_tree_into_place() {
        let temp = TempDir::new().unwrap();
        let base = DestDir::new(temp.path()).unwrap();
        let name = ProjectName::parse("widget").unwrap();

        let value = staged_extract(&base, &name, |stage| {
            let root = stage.create_child(name.as_str())?;
            fs::write(root.join_path("go.mod".as_ref()), "module widget")?;
            Ok(42)
        })
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(
            fs::read_to_string(temp.path().join("widget/go.mod")).unwrap(),
            "module widget"
        );
        assert_eq!(staging_dirs(&base), 0);
    }

    #[test]
    fn test_failure_leaves_nothing_behind() {
        let temp = TempDir::new().unwrap();
        let base = DestDir::new(temp.path()).unwrap();
        let name = ProjectName::parse("widget").unwrap();

        let result: Result<()> = staged_extract(&base, &name, |stage| {
            let root = stage.create_child(name.as_str())?;
            fs::write(root.join_path("partial.go".as_ref()), "package partial")?;
            Err(ScaffoldError::InvalidArchive("truncated".into()))
        });

        assert!(matches!(result, Err(ScaffoldError::InvalidArchive(_))));
        assert!(!temp.path().join("widget").exists());
        assert_eq!(staging_dirs(&base), 0);
    }

    #[test]
    fn test_existing_destination_rejected() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("widget")).unwrap();
        let base = DestDir::new(temp.path()).unwrap();
        let name = ProjectName::parse("widget").unwrap();

        let mut called = false;
        let result = staged_extract(&base, &name, |_| {
            called = true;
            Ok(())
        });

        assert!(matches!(result, Err(ScaffoldError::DestinationExists { .. })));
        assert!(!called);
    }
}
