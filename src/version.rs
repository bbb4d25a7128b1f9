//! API microversions
//!
//! The share API negotiates behavior through "major.minor" microversions sent
//! in a request header. Versions order numerically per component, so `2.9`
//! sorts before `2.10`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches a bare "major.minor" pair such as "2.55"
static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\.(\d+)\s*$").expect("version pattern is valid"));

/// Error parsing an API version string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("Malformed API version {0:?}: expected \"major.minor\"")]
    Malformed(String),

    #[error("API version component out of range in {0:?}")]
    OutOfRange(String),
}

/// A "major.minor" API microversion.
///
/// Field order matters: the derived `Ord` compares `major` first, then
/// `minor`, both as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    major: u32,
    minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// The next minor version within the same major series
    pub fn next_minor(&self) -> Self {
        Self::new(self.major, self.minor + 1)
    }

    /// The previous minor version, or `None` at `X.0`
    pub fn prev_minor(&self) -> Option<Self> {
        self.minor
            .checked_sub(1)
            .map(|minor| Self::new(self.major, minor))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = VERSION_PATTERN
            .captures(s)
            .ok_or_else(|| VersionError::Malformed(s.to_string()))?;

        let major = caps[1]
            .parse()
            .map_err(|_| VersionError::OutOfRange(s.to_string()))?;
        let minor = caps[2]
            .parse()
            .map_err(|_| VersionError::OutOfRange(s.to_string()))?;

        Ok(Self::new(major, minor))
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(version: ApiVersion) -> Self {
        version.to_string()
    }
}

/// An inclusive range of microversions within one major series.
///
/// Used to iterate every version a deployment claims to support, e.g. for
/// tests that must hold at each microversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    min: ApiVersion,
    max: ApiVersion,
}

impl VersionRange {
    /// Create a range; returns `None` if `min > max` or the majors differ.
    pub fn new(min: ApiVersion, max: ApiVersion) -> Option<Self> {
        if min > max || min.major != max.major {
            return None;
        }
        Some(Self { min, max })
    }

    pub fn min(&self) -> ApiVersion {
        self.min
    }

    pub fn max(&self) -> ApiVersion {
        self.max
    }

    pub fn contains(&self, version: ApiVersion) -> bool {
        self.min <= version && version <= self.max
    }

    /// Iterate every minor version from `min` to `max` inclusive
    pub fn iter(&self) -> impl Iterator<Item = ApiVersion> {
        let major = self.min.major;
        (self.min.minor..=self.max.minor).map(move |minor| ApiVersion::new(major, minor))
    }
}
