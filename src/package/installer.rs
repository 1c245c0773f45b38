use crate::core::{PkgError, PkgResult, ResultExt};
use crate::package::extractor::PackageExtractor;
use crate::package::integrity::{ArchiveIntegrityChecker, ArchiveStatus};
use crate::package::manifest::DirectoryManifestVerifier;
use crate::resource::ArchiveResource;
use std::path::Path;

/// Installs a cached archive: integrity check, extraction, stamping
pub struct PackageInstaller {
    extractor: PackageExtractor,
    verifier: DirectoryManifestVerifier,
}

impl PackageInstaller {
    pub fn new(verifier: DirectoryManifestVerifier) -> Self {
        Self {
            extractor: PackageExtractor::new(),
            verifier,
        }
    }

    /// Install `resource` into `dest`
    ///
    /// Refuses archives that are missing or fail their integrity check; the
    /// installed directory is stamped with a manifest on success.
    pub fn install<R: ArchiveResource + ?Sized>(&self, resource: &R, dest: &Path) -> PkgResult<()> {
        let archive_path = resource.archive_path().context("getting archive path")?;

        match ArchiveIntegrityChecker::new(resource).status()? {
            ArchiveStatus::Valid => {}
            ArchiveStatus::Absent => {
                return Err(PkgError::Package(format!(
                    "Archive {} is not cached",
                    archive_path.display()
                )))
            }
            ArchiveStatus::Invalid => {
                return Err(PkgError::Package(format!(
                    "Archive {} failed integrity check",
                    archive_path.display()
                )))
            }
        }

        self.extractor
            .extract(&archive_path, dest)
            .context("extracting archive")?;
        self.verifier.stamp(dest).context("stamping installation")?;

        tracing::info!(
            archive = %archive_path.display(),
            dest = %dest.display(),
            "installed package"
        );
        Ok(())
    }

    /// Whether an installed directory still matches its manifest
    pub fn is_intact(&self, dest: &Path) -> PkgResult<bool> {
        self.verifier.verify(dest)
    }
}

impl Default for PackageInstaller {
    fn default() -> Self {
        Self::new(DirectoryManifestVerifier::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::core::checksum::{Checksum, HashAlgorithm};
    use crate::resource::DownloadResource;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn cache_with_archive(temp: &TempDir) -> (Cache, DownloadResource) {
        let cache = Cache::new(temp.path().join("cache")).unwrap();
        let mut resource = DownloadResource {
            url: "https://example.com/core-1.0.0.tar.gz".to_string(),
            archive_file_name: "core-1.0.0.tar.gz".to_string(),
            checksum: String::new(),
            size: 0,
            cache_path: "packages".to_string(),
        };

        let path = cache.archive_path(&resource).unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut builder = tar::Builder::new(GzEncoder::new(
            File::create(&path).unwrap(),
            Compression::default(),
        ));
        let mut header = tar::Header::new_gnu();
        header.set_size(3);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, "core/boards.txt", &b"uno"[..]).unwrap();
        builder.into_inner().unwrap().finish().unwrap();

        resource.size = fs::metadata(&path).unwrap().len();
        resource.checksum = Checksum::of_file(HashAlgorithm::Sha256, &path)
            .unwrap()
            .to_string();
        (cache, resource)
    }

    #[test]
    fn test_install_extracts_and_stamps() {
        let temp = TempDir::new().unwrap();
        let (cache, resource) = cache_with_archive(&temp);
        let dest = temp.path().join("installed");

        let installer = PackageInstaller::default();
        installer.install(&cache.locate(&resource), &dest).unwrap();

        assert_eq!(fs::read(dest.join("boards.txt")).unwrap(), b"uno");
        assert!(dest.join("package.json").exists());
        assert!(installer.is_intact(&dest).unwrap());

        fs::write(dest.join("boards.txt"), b"mega").unwrap();
        assert!(!installer.is_intact(&dest).unwrap());
    }

    #[test]
    fn test_install_refuses_missing_archive() {
        let temp = TempDir::new().unwrap();
        let (cache, resource) = cache_with_archive(&temp);
        cache.remove_archive(&resource).unwrap();

        let err = PackageInstaller::default()
            .install(&cache.locate(&resource), &temp.path().join("installed"))
            .unwrap_err();
        assert!(err.to_string().contains("is not cached"));
    }

    #[test]
    fn test_install_refuses_corrupt_archive() {
        let temp = TempDir::new().unwrap();
        let (cache, mut resource) = cache_with_archive(&temp);
        resource.checksum = format!("SHA-256:{}", "00".repeat(32));

        let dest = temp.path().join("installed");
        let err = PackageInstaller::default()
            .install(&cache.locate(&resource), &dest)
            .unwrap_err();
        assert!(err.to_string().contains("failed integrity check"));
        assert!(!dest.exists());
    }
}
