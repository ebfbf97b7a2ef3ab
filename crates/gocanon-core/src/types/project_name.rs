//! Validated project name.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::Result;
use crate::ScaffoldError;

/// Name of the project being generated.
///
/// Used both as the project root directory name and as the replacement for
/// the placeholder token. Surrounding whitespace is trimmed; the result must
/// be usable as a single path segment.
///
/// # Examples
///
/// ```
/// use gocanon_core::ProjectName;
///
/// let name = ProjectName::parse("widget\n").unwrap();
/// assert_eq!(name.as_str(), "widget");
///
/// assert!(ProjectName::parse("   ").is_err());
/// assert!(ProjectName::parse("a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Trims and validates a raw project name.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::InvalidProjectName` if the trimmed name is
    /// empty, is `.` or `..`, or contains a path separator or null byte.
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();

        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name == "." || name == ".." {
            Some("name refers to a relative directory")
        } else if name.contains(['/', '\\']) {
            Some("name contains a path separator")
        } else if name.contains('\0') {
            Some("name contains a null byte")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ScaffoldError::InvalidProjectName {
                name: name.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(Self(name.to_string())),
        }
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the name itself contains `token`.
    ///
    /// Such a name still works, but a second rewrite pass over the generated
    /// tree would substitute inside the name again.
    #[must_use]
    pub fn contains_token(&self, token: &str) -> bool {
        !token.is_empty() && self.0.contains(token)
    }
}

impl FromStr for ProjectName {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for ProjectName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}
