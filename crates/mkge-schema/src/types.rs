//! Archive version types decoded from file names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ARCHIVE_PREFIX, RUNTIME_MARKER};

/// Errors raised while decoding archive file names and their components.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The file name does not follow `mkge-<major>.<minor>.<revision><type>+madkit-<runtime>`.
    #[error("Invalid file: {0}")]
    InvalidFileName(String),

    /// The release type is not `Stable`, `Alpha<N>` or `Beta<N>`.
    #[error("Invalid release type: {0}")]
    InvalidReleaseType(String),

    /// The runtime version is not four dot-separated integers.
    #[error("Invalid runtime version: {0}")]
    InvalidRuntimeVersion(String),

    /// A numeric component does not fit in 32 bits.
    #[error("Version component out of range: {0}")]
    OutOfRange(String),
}

fn parse_component(raw: &str) -> Result<u32, ParseError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidRuntimeVersion(raw.to_string()));
    }
    raw.parse::<u32>()
        .map_err(|_| ParseError::OutOfRange(raw.to_string()))
}

/// Release channel of an archive.
///
/// Variants are declared in release-recency order so the derived [`Ord`]
/// ranks `Stable` above every `Beta`, and every `Beta` above every `Alpha`.
/// Within a channel the iteration number compares numerically, so `Alpha10`
/// is newer than `Alpha9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReleaseType {
    /// Alpha pre-release with its iteration number.
    Alpha(u32),
    /// Beta pre-release with its iteration number.
    Beta(u32),
    /// Final release.
    Stable,
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha(n) => write!(f, "Alpha{n}"),
            Self::Beta(n) => write!(f, "Beta{n}"),
            Self::Stable => f.write_str("Stable"),
        }
    }
}

impl FromStr for ReleaseType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Stable" {
            return Ok(Self::Stable);
        }
        let (ctor, digits): (fn(u32) -> Self, &str) = if let Some(rest) = s.strip_prefix("Alpha") {
            (Self::Alpha, rest)
        } else if let Some(rest) = s.strip_prefix("Beta") {
            (Self::Beta, rest)
        } else {
            return Err(ParseError::InvalidReleaseType(s.to_string()));
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidReleaseType(s.to_string()));
        }
        let n = digits
            .parse::<u32>()
            .map_err(|_| ParseError::OutOfRange(s.to_string()))?;
        Ok(ctor(n))
    }
}

impl TryFrom<String> for ReleaseType {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReleaseType> for String {
    fn from(value: ReleaseType) -> Self {
        value.to_string()
    }
}

/// Four-part version of the bundled `MadKit` runtime (e.g. `5.1.0.0`).
///
/// Ordering is numeric component by component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuntimeVersion([u32; 4]);

impl RuntimeVersion {
    /// Build a version from its four components.
    pub const fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
        Self([major, minor, patch, build])
    }

    /// The four numeric components, most significant first.
    pub fn components(&self) -> [u32; 4] {
        self.0
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl FromStr for RuntimeVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = [0u32; 4];
        let mut iter = s.split('.');
        for slot in &mut parts {
            let raw = iter
                .next()
                .ok_or_else(|| ParseError::InvalidRuntimeVersion(s.to_string()))?;
            *slot = parse_component(raw).map_err(|e| match e {
                ParseError::OutOfRange(_) => ParseError::OutOfRange(s.to_string()),
                _ => ParseError::InvalidRuntimeVersion(s.to_string()),
            })?;
        }
        if iter.next().is_some() {
            return Err(ParseError::InvalidRuntimeVersion(s.to_string()));
        }
        Ok(Self(parts))
    }
}

impl TryFrom<String> for RuntimeVersion {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RuntimeVersion> for String {
    fn from(value: RuntimeVersion) -> Self {
        value.to_string()
    }
}

/// Version metadata recovered from one archive file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveRecord {
    /// Major version number.
    pub major: u32,
    /// Minor version number.
    pub minor: u32,
    /// Revision number.
    pub revision: u32,
    /// Release channel and iteration.
    pub release: ReleaseType,
    /// Bundled runtime version. Only `WithMadKit/` archives are indexed, so
    /// every record carries one.
    pub runtime: RuntimeVersion,
}

impl ArchiveRecord {
    /// Release name without the runtime part, e.g. `mkge-1.2.3Stable`.
    pub fn release_name(&self) -> String {
        format!(
            "{ARCHIVE_PREFIX}{}.{}.{}{}",
            self.major, self.minor, self.revision, self.release
        )
    }

    /// Full archive stem, e.g. `mkge-1.2.3Stable+madkit-5.1.0.0`.
    pub fn archive_stem(&self) -> String {
        format!("{}{RUNTIME_MARKER}{}", self.release_name(), self.runtime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_type_parsing() {
        assert_eq!("Stable".parse::<ReleaseType>().unwrap(), ReleaseType::Stable);
        assert_eq!("Alpha3".parse::<ReleaseType>().unwrap(), ReleaseType::Alpha(3));
        assert_eq!("Beta12".parse::<ReleaseType>().unwrap(), ReleaseType::Beta(12));

        assert!("Alpha".parse::<ReleaseType>().is_err());
        assert!("Gamma1".parse::<ReleaseType>().is_err());
        assert!("stable".parse::<ReleaseType>().is_err());
        assert!("Beta1x".parse::<ReleaseType>().is_err());
    }

    #[test]
    fn test_release_type_ordering() {
        let mut types = vec![
            ReleaseType::Alpha(9),
            ReleaseType::Stable,
            ReleaseType::Alpha(10),
            ReleaseType::Beta(1),
        ];
        types.sort_by(|a, b| b.cmp(a));
        assert_eq!(
            types,
            vec![
                ReleaseType::Stable,
                ReleaseType::Beta(1),
                ReleaseType::Alpha(10),
                ReleaseType::Alpha(9),
            ]
        );
    }

    #[test]
    fn test_runtime_version_parsing() {
        let v: RuntimeVersion = "5.1.0.12".parse().unwrap();
        assert_eq!(v.components(), [5, 1, 0, 12]);
        assert_eq!(v.to_string(), "5.1.0.12");

        assert!("5.1.0".parse::<RuntimeVersion>().is_err());
        assert!("5.1.0.0.1".parse::<RuntimeVersion>().is_err());
        assert!("5.a.0.0".parse::<RuntimeVersion>().is_err());
        assert!("5..0.0".parse::<RuntimeVersion>().is_err());
        assert!(matches!(
            "99999999999.0.0.0".parse::<RuntimeVersion>(),
            Err(ParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_runtime_version_numeric_order() {
        let older: RuntimeVersion = "5.0.0.9".parse().unwrap();
        let newer: RuntimeVersion = "5.0.0.10".parse().unwrap();
        assert!(newer > older);
    }

    #[test]
    fn test_archive_names() {
        let record = ArchiveRecord {
            major: 1,
            minor: 2,
            revision: 3,
            release: ReleaseType::Stable,
            runtime: RuntimeVersion::new(5, 1, 0, 0),
        };
        assert_eq!(record.release_name(), "mkge-1.2.3Stable");
        assert_eq!(record.archive_stem(), "mkge-1.2.3Stable+madkit-5.1.0.0");
    }

    #[test]
    fn test_serde_uses_display_form() {
        let json = serde_json::to_string(&ReleaseType::Beta(2)).unwrap();
        assert_eq!(json, "\"Beta2\"");
        let back: RuntimeVersion = serde_json::from_str("\"5.1.0.0\"").unwrap();
        assert_eq!(back, RuntimeVersion::new(5, 1, 0, 0));
    }
}
