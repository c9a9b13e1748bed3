//! Document fingerprint type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque unique identifier for a logical document.
///
/// The fingerprint doubles as the document's directory name under the data
/// root, so validation rejects exactly the values that would break that
/// contract: empty strings, path separators, NUL, and the `.`/`..`
/// components. Anything else is accepted verbatim.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Create from a string, validating it is usable as a directory name.
    pub fn new(fingerprint: impl Into<String>) -> crate::Result<Self> {
        let fingerprint = fingerprint.into();
        if fingerprint.is_empty() {
            return Err(crate::Error::InvalidFingerprint(
                "fingerprint cannot be empty".to_string(),
            ));
        }
        if fingerprint == "." || fingerprint == ".." {
            return Err(crate::Error::InvalidFingerprint(format!(
                "fingerprint cannot be a relative path component: {fingerprint}"
            )));
        }
        for c in fingerprint.chars() {
            if matches!(c, '/' | '\\' | '\0') {
                return Err(crate::Error::InvalidFingerprint(format!(
                    "invalid character in fingerprint: {c:?}"
                )));
            }
        }
        Ok(Self(fingerprint))
    }

    /// Get the fingerprint string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
