//! Package index model: cores and their downloadable releases.
//!
//! The index is a JSON file produced elsewhere; this module only reads it.
//!
//! ```json
//! { "packages": [ {
//!     "name": "avr", "architecture": "avr", "category": "Arduino",
//!     "releases": { "1.8.3": {
//!         "version": "1.8.3", "boards": ["Uno"],
//!         "url": "https://example.com/avr-1.8.3.tar.gz",
//!         "archiveFileName": "avr-1.8.3.tar.gz",
//!         "checksum": "SHA-256:…", "size": "4927681" } } } ] }
//! ```

use crate::core::version::Version;
use crate::core::{PkgError, PkgResult, ResultExt};
use crate::resource::DownloadResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Index {
    #[serde(default)]
    pub packages: Vec<Core>,
}

/// A core package and its releases, keyed by version string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Core {
    pub name: String,
    pub architecture: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub releases: BTreeMap<String, Release>,
}

/// One downloadable release of a core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub version: String,
    #[serde(default)]
    pub boards: Vec<String>,
    #[serde(flatten)]
    pub resource: DownloadResource,
}

impl Index {
    /// Load an index file
    pub fn load(path: &Path) -> PkgResult<Self> {
        let content = fs::read(path).context(format!("reading index {}", path.display()))?;
        serde_json::from_slice::<Self>(&content).context(format!("parsing index {}", path.display()))
    }

    /// Find a core by name, optionally narrowed to one architecture
    pub fn find(&self, name: &str, architecture: Option<&str>) -> Option<&Core> {
        self.packages
            .iter()
            .find(|core| core.name == name && architecture.map_or(true, |a| core.architecture == a))
    }

    /// Resolve a release: the given version, or the latest one
    pub fn release(
        &self,
        name: &str,
        architecture: Option<&str>,
        version: Option<&str>,
    ) -> PkgResult<&Release> {
        let core = self
            .find(name, architecture)
            .ok_or_else(|| PkgError::Package(format!("Package '{}' not found in index", name)))?;

        let release = match version {
            Some(v) => core.get_version(v),
            None => core.latest(),
        };
        release.ok_or_else(|| {
            PkgError::Package(format!(
                "Release '{}' of '{}' not found in index",
                version.unwrap_or("latest"),
                name
            ))
        })
    }
}

impl Core {
    /// The release published under exactly this version string
    pub fn get_version(&self, version: &str) -> Option<&Release> {
        self.releases.get(version)
    }

    /// All release versions that parse, ascending
    pub fn versions(&self) -> Vec<Version> {
        let mut versions: Vec<Version> = self
            .releases
            .values()
            .filter_map(|release| Version::parse(&release.version).ok())
            .collect();
        versions.sort();
        versions
    }

    /// The release with the highest parsable version
    pub fn latest(&self) -> Option<&Release> {
        self.releases
            .values()
            .filter_map(|release| Some((Version::parse(&release.version).ok()?, release)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, release)| release)
    }
}
