//! Listing configuration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::probe::{DEFAULT_HEAD_SIZE, DEFAULT_TAIL_SIZE, SNIFF_LEN};

/// Default number of entries shown before the listing is truncated.
pub const DEFAULT_CAP: usize = 200;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}

// ── Platform ──────────────────────────────────────────────────────────────────

/// The platform an upload was filed under.  It decides how ambiguous
/// signatures are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    #[default]
    Unknown,
    Dos,
    Windows,
    Amiga,
    Linux,
    Mac,
    Java,
    Audio,
    Text,
}

impl Platform {
    pub const ALL: [Platform; 9] = [
        Platform::Unknown,
        Platform::Dos,
        Platform::Windows,
        Platform::Amiga,
        Platform::Linux,
        Platform::Mac,
        Platform::Java,
        Platform::Audio,
        Platform::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Unknown => "unknown",
            Platform::Dos     => "dos",
            Platform::Windows => "windows",
            Platform::Amiga   => "amiga",
            Platform::Linux   => "linux",
            Platform::Mac     => "mac",
            Platform::Java    => "java",
            Platform::Audio   => "audio",
            Platform::Text    => "text",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownPlatform(s.to_string()))
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<Platform>().map_err(serde::de::Error::custom)
    }
}

// ── ListingOptions ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingOptions {
    /// Entries shown before the listing is cut short.
    pub cap:          usize,
    pub platform:     Platform,
    pub head_size:    usize,
    pub tail_size:    usize,
    pub follow_links: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            cap:          DEFAULT_CAP,
            platform:     Platform::Unknown,
            head_size:    DEFAULT_HEAD_SIZE,
            tail_size:    DEFAULT_TAIL_SIZE,
            follow_links: false,
        }
    }
}

impl ListingOptions {
    /// Load options from a JSON file.  Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_slice(bytes)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cap == 0 {
            return Err(ConfigError::Invalid("cap must be at least 1".into()));
        }
        if self.head_size < SNIFF_LEN {
            return Err(ConfigError::Invalid(format!(
                "head_size must be at least {SNIFF_LEN} bytes, got {}",
                self.head_size
            )));
        }
        Ok(())
    }
}
