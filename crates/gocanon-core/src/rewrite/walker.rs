//! Tree walk applying placeholder substitution to selected files.

use std::fs;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

use walkdir::WalkDir;

use crate::Result;
use crate::RewriteReport;
use crate::ScaffoldError;
use crate::copy::first_error;

use super::RewritePolicy;
use super::replace_literal;

/// Walks `root` and replaces `token` with `replacement` in every regular
/// file selected by `policy`.
///
/// Symlinks are neither followed nor rewritten. Entries are visited in file
/// name order and the walk stops at the first error.
///
/// # Errors
///
/// - `InvalidConfig` if `token` is empty
/// - `Walk` if `root` or a directory below it cannot be visited
/// - `Rewrite` if a target cannot be read or written back
pub fn rewrite_tree(
    root: &Path,
    token: &str,
    replacement: &str,
    policy: &RewritePolicy,
) -> Result<RewriteReport> {
    if token.is_empty() {
        return Err(ScaffoldError::InvalidConfig {
            reason: "placeholder token must not be empty".into(),
        });
    }

    let mut report = RewriteReport::default();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| ScaffoldError::Walk {
            path: source
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            source,
        })?;

        if !entry.file_type().is_file() || !policy.is_target(entry.file_name()) {
            continue;
        }

        report.files_scanned += 1;
        let count = rewrite_file(entry.path(), token.as_bytes(), replacement.as_bytes())?;
        if count > 0 {
            report.files_rewritten += 1;
            report.replacements += count;
        }
    }

    Ok(report)
}

/// Rewrites a single file in place and returns the number of replacements.
///
/// A file without any occurrence is left untouched. The file keeps its
/// permissions; a read-only file is made owner-writable for the duration
/// of the write.
///
/// # Errors
///
/// Returns `Rewrite` with the first I/O error observed.
pub fn rewrite_file(path: &Path, token: &[u8], replacement: &[u8]) -> Result<usize> {
    let to_error = |source| ScaffoldError::Rewrite {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read(path).map_err(to_error)?;
    let (rewritten, count) = replace_literal(&content, token, replacement);
    if count == 0 {
        return Ok(0);
    }

    let original = fs::metadata(path).map_err(to_error)?.permissions();
    let unlocked = make_writable(path, &original).map_err(to_error)?;

    let written = write_back(path, &rewritten);
    let restored = if unlocked {
        fs::set_permissions(path, original)
    } else {
        Ok(())
    };
    first_error(written, restored).map_err(to_error)?;

    Ok(count)
}

fn write_back(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::options().write(true).truncate(true).open(path)?;
    file.write_all(content)?;
    file.flush()
}

/// Grants owner write permission if missing. Returns whether the
/// permissions were changed.
#[cfg(unix)]
fn make_writable(path: &Path, permissions: &fs::Permissions) -> io::Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let mode = permissions.mode();
    if mode & 0o200 != 0 {
        return Ok(false);
    }
    fs::set_permissions(path, fs::Permissions::from_mode(mode | 0o200))?;
    Ok(true)
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn make_writable(path: &Path, permissions: &fs::Permissions) -> io::Result<bool> {
    if !permissions.readonly() {
        return Ok(false);
    }
    let mut writable = permissions.clone();
    writable.set_readonly(false);
    fs::set_permissions(path, writable)?;
    Ok(true)
}
