//! Validated attachment file names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated attachment file name.
///
/// Accepted names are one or more alphanumeric characters, optionally
/// followed by a dot and a 3-4 character alphanumeric extension
/// (`report.pdf`, `page1.jpeg`, `cover`). Path separators, dots-only
/// names, and longer extensions are rejected, which keeps every accepted
/// name safe to join under a backend directory.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileName(String);

impl FileName {
    /// Create from a string, validating the name grammar.
    pub fn new(name: impl Into<String>) -> crate::Result<Self> {
        let name = name.into();
        if !Self::is_valid(&name) {
            return Err(crate::Error::InvalidFileName(name));
        }
        Ok(Self(name))
    }

    /// Whether `name` matches the attachment name grammar.
    pub fn is_valid(name: &str) -> bool {
        let (stem, extension) = match name.split_once('.') {
            Some((stem, extension)) => (stem, Some(extension)),
            None => (name, None),
        };

        if stem.is_empty() || !stem.chars().all(|c| c.is_ascii_alphanumeric()) {
            return false;
        }

        match extension {
            None => true,
            Some(extension) => {
                (3..=4).contains(&extension.len())
                    && extension.chars().all(|c| c.is_ascii_alphanumeric())
            }
        }
    }

    /// Get the name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileName({self})")
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for valid in ["report.pdf", "page1.jpeg", "cover", "0001.png", "a.txt"] {
            assert!(FileName::is_valid(valid), "expected valid: {valid}");
            assert_eq!(FileName::new(valid).unwrap().as_str(), valid);
        }
    }

    #[test]
    fn test_rejects_empty_and_dots() {
        for invalid in ["", ".", "..", ".pdf", "name."] {
            assert!(!FileName::is_valid(invalid), "expected invalid: {invalid}");
        }
    }

    #[test]
    fn test_rejects_separators() {
        for invalid in ["a/b.pdf", "..\\evil.pdf", "dir/file", "/etc"] {
            assert!(!FileName::is_valid(invalid), "expected invalid: {invalid}");
            assert!(FileName::new(invalid).is_err());
        }
    }

    #[test]
    fn test_extension_length_bounds() {
        assert!(!FileName::is_valid("file.ab"));
        assert!(FileName::is_valid("file.abc"));
        assert!(FileName::is_valid("file.abcd"));
        assert!(!FileName::is_valid("file.abcde"));
    }

    #[test]
    fn test_rejects_multiple_dots_and_unicode() {
        assert!(!FileName::is_valid("a.b.pdf"));
        assert!(!FileName::is_valid("r\u{00e9}sum\u{00e9}.pdf"));
        assert!(!FileName::is_valid("name .pdf"));
    }
}
