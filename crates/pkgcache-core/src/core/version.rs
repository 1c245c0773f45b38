use crate::core::error::{PkgError, PkgResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A release version as published in a package index ("1.8.3", "2.0").
///
/// Missing minor/patch components default to zero. Anything after a `-` or
/// `+` (pre-release or build tags) is kept for display but does not take
/// part in ordering beyond breaking ties: a tagged version sorts before the
/// same untagged version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            tag: None,
        }
    }

    /// Parse a version string (e.g., "1.2.3", "1.2" or "1.2.3-rc1")
    pub fn parse(s: &str) -> PkgResult<Self> {
        let s = s.trim();
        let (numbers, tag) = match s.find(|c: char| c == '-' || c == '+') {
            Some(idx) => (&s[..idx], Some(s[idx + 1..].to_string())),
            None => (s, None),
        };

        let mut parts = numbers.split('.');
        let mut component = |name: &str, required: bool| -> PkgResult<u64> {
            match parts.next() {
                Some(p) => p
                    .parse()
                    .map_err(|_| PkgError::Version(format!("Invalid {} version: {}", name, s))),
                None if required => {
                    Err(PkgError::Version(format!("Invalid version format: {}", s)))
                }
                None => Ok(0),
            }
        };

        let major = component("major", true)?;
        let minor = component("minor", false)?;
        let patch = component("patch", false)?;

        if parts.next().is_some() {
            return Err(PkgError::Version(format!("Invalid version format: {}", s)));
        }

        Ok(Self {
            major,
            minor,
            patch,
            tag: tag.filter(|t| !t.is_empty()),
        })
    }
}

impl FromStr for Version {
    type Err = PkgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.tag, &other.tag) {
                (None, None) => std::cmp::Ordering::Equal,
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(tag) = &self.tag {
            write!(f, "-{}", tag)?;
        }
        Ok(())
    }
}
