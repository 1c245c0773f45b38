pub mod cache;
pub mod check;
pub mod hash;
pub mod install;
pub mod stamp;
pub mod verify;

use pkgcache::config::Config;
use pkgcache::core::PkgResult;
use pkgcache::index::{Index, Release};
use pkgcache::package::{DirectoryManifestVerifier, WalkPolicy};
use std::path::PathBuf;

/// Selects one release out of an index file
pub struct ReleaseSelector {
    pub index: PathBuf,
    pub package: String,
    pub arch: Option<String>,
    pub version: Option<String>,
}

impl ReleaseSelector {
    pub fn resolve(&self) -> PkgResult<Release> {
        let index = Index::load(&self.index)?;
        let release = index.release(&self.package, self.arch.as_deref(), self.version.as_deref())?;
        Ok(release.clone())
    }
}

/// Manifest verifier honouring the configured walk policy, or strict mode
/// when requested on the command line
pub fn manifest_verifier(config: &Config, strict: bool) -> DirectoryManifestVerifier {
    let policy = if strict {
        WalkPolicy::Strict
    } else {
        config.walk_policy
    };
    DirectoryManifestVerifier::new(policy)
}
