//! Directory checksum manifests.
//!
//! An installed package directory is stamped with a `package.json` sidecar
//! holding the SHA-256 of every file below it, concatenated in a fixed
//! order. Re-verifying later detects files that changed since install.

use crate::core::checksum::{hash_reader, HashAlgorithm};
use crate::core::{PkgError, PkgResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the sidecar file at the root of a stamped directory
pub const MANIFEST_FILE_NAME: &str = "package.json";

#[cfg(unix)]
const MANIFEST_FILE_MODE: u32 = 0o644;

/// Contents of the sidecar file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Lowercase hex SHA-256 of the directory contents
    pub checksum: String,
}

impl PackageManifest {
    /// Path of the sidecar for `root`
    pub fn path(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILE_NAME)
    }

    /// Read the sidecar at `root`
    ///
    /// A missing sidecar is [`PkgError::ManifestNotFound`], so callers can
    /// tell "never stamped" apart from "stamped but unreadable".
    pub fn load(root: &Path) -> PkgResult<Self> {
        let path = Self::path(root);
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PkgError::ManifestNotFound(path))
            }
            Err(e) => return Err(PkgError::from(e).context(format!("reading {}", path.display()))),
        };

        serde_json::from_slice::<Self>(&content).context(format!("parsing {}", path.display()))
    }

    /// Write the sidecar at `root`, replacing any previous one
    pub fn save(&self, root: &Path) -> PkgResult<()> {
        let path = Self::path(root);
        let content = serde_json::to_vec(self)?;
        fs::write(&path, content).context(format!("writing {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(MANIFEST_FILE_MODE))?;
        }

        Ok(())
    }
}

/// How the tree walk treats entries it cannot open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkPolicy {
    /// Skip unreadable files and directories with a warning. Coverage is
    /// best-effort: a file nobody can open is simply not part of the digest.
    #[default]
    Lenient,
    /// Fail on the first entry that cannot be opened
    Strict,
}

/// Computes, stamps and verifies directory checksums
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryManifestVerifier {
    policy: WalkPolicy,
}

impl DirectoryManifestVerifier {
    pub fn new(policy: WalkPolicy) -> Self {
        Self { policy }
    }

    /// Hex SHA-256 over the contents of every regular file below `root`
    ///
    /// Entries are visited depth first, sorted by file name within each
    /// directory. The sidecar at `root` is excluded; a `package.json`
    /// deeper in the tree is hashed like any other file. Symlinks are not
    /// followed. A read error on a file that did open always aborts.
    pub fn compute_tree_digest(&self, root: &Path) -> PkgResult<String> {
        let metadata = fs::metadata(root).context(format!("reading {}", root.display()))?;
        if !metadata.is_dir() {
            return Err(PkgError::Path(format!("{} is not a directory", root.display())));
        }

        let mut hasher = HashAlgorithm::Sha256.hasher();
        let mut hashed = 0usize;

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => match self.policy {
                    WalkPolicy::Lenient => {
                        tracing::warn!(error = %e, "skipping unreadable entry");
                        continue;
                    }
                    WalkPolicy::Strict => return Err(PkgError::from(e).context("walking directory")),
                },
            };

            if !entry.file_type().is_file() {
                continue;
            }
            if entry.depth() == 1 && entry.file_name() == MANIFEST_FILE_NAME {
                continue;
            }

            let path = entry.path();
            let mut file = match File::open(path) {
                Ok(file) => file,
                Err(e) => {
                    self.on_open_error(path, e)?;
                    continue;
                }
            };

            hash_reader(hasher.as_mut(), &mut file).map_err(|source| PkgError::HashComputation {
                path: path.to_path_buf(),
                source,
            })?;
            hashed += 1;
        }

        tracing::debug!(root = %root.display(), files = hashed, "computed tree digest");
        Ok(hex::encode(hasher.finalize()))
    }

    /// Lenient: warn and let the caller skip the file. Strict: fail.
    fn on_open_error(&self, path: &Path, e: io::Error) -> PkgResult<()> {
        match self.policy {
            WalkPolicy::Lenient => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                Ok(())
            }
            WalkPolicy::Strict => Err(PkgError::from(e).context(format!("opening {}", path.display()))),
        }
    }

    /// Record the current tree digest in the sidecar at `root`
    pub fn stamp(&self, root: &Path) -> PkgResult<()> {
        let checksum = self.compute_tree_digest(root)?;
        tracing::info!(root = %root.display(), %checksum, "stamping directory");
        PackageManifest { checksum }.save(root)
    }

    /// Compare the sidecar at `root` with a freshly computed digest
    pub fn verify(&self, root: &Path) -> PkgResult<bool> {
        let manifest = PackageManifest::load(root)?;
        let checksum = self.compute_tree_digest(root)?;

        let matches = manifest.checksum == checksum;
        if !matches {
            tracing::warn!(
                root = %root.display(),
                recorded = %manifest.checksum,
                actual = %checksum,
                "directory checksum mismatch"
            );
        }
        Ok(matches)
    }
}
