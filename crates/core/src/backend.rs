//! Logical attachment storage areas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named logical storage area for attachment files.
///
/// The set is closed. Parsing is case-insensitive; the on-disk directory
/// name is the lowercase form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Captured images and page screenshots.
    Image,
    /// Video attachments.
    Video,
    /// Audio attachments.
    Audio,
}

impl Backend {
    /// The on-disk directory name for this backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl FromStr for Backend {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            other => Err(crate::Error::InvalidBackend(other.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
