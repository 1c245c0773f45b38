use crate::core::{PkgError, PkgResult};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tar::Archive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveFormat {
    TarGz,
    Tar,
    Zip,
}

impl ArchiveFormat {
    fn detect(archive_path: &Path) -> PkgResult<Self> {
        let name = archive_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| PkgError::Extract("Unknown archive format".to_string()))?;

        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Ok(ArchiveFormat::TarGz)
        } else if name.ends_with(".tar") {
            Ok(ArchiveFormat::Tar)
        } else if name.ends_with(".zip") {
            Ok(ArchiveFormat::Zip)
        } else {
            Err(PkgError::Extract(format!("Unsupported format: {}", name)))
        }
    }
}

/// Extracts package archives (tar.gz, tar, zip) into an installation directory
///
/// Archives are unpacked into a staging directory next to the destination
/// and moved into place only once extraction succeeded. When the archive
/// holds a single top-level directory (the usual layout for release
/// archives) that directory becomes the destination.
pub struct PackageExtractor;

impl PackageExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract `archive_path` into `dest`, which must not exist yet
    pub fn extract(&self, archive_path: &Path, dest: &Path) -> PkgResult<()> {
        let format = ArchiveFormat::detect(archive_path)?;

        if dest.exists() {
            return Err(PkgError::Extract(format!(
                "Destination already exists: {}",
                dest.display()
            )));
        }

        let staging = staging_dir(dest)?;
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;

        let result = self
            .unpack(format, archive_path, &staging)
            .and_then(|()| move_into_place(&staging, dest));

        // Cleanup staging directory regardless of outcome
        if staging.exists() {
            let _ = fs::remove_dir_all(&staging);
        }

        if result.is_ok() {
            tracing::debug!(
                archive = %archive_path.display(),
                dest = %dest.display(),
                "extracted archive"
            );
        }
        result
    }

    fn unpack(&self, format: ArchiveFormat, archive_path: &Path, into: &Path) -> PkgResult<()> {
        let file = File::open(archive_path)?;
        match format {
            ArchiveFormat::TarGz => Archive::new(GzDecoder::new(file))
                .unpack(into)
                .map_err(|e| PkgError::Extract(format!("Invalid tar.gz: {}", e))),
            ArchiveFormat::Tar => Archive::new(file)
                .unpack(into)
                .map_err(|e| PkgError::Extract(format!("Invalid tar: {}", e))),
            ArchiveFormat::Zip => {
                let mut archive = zip::ZipArchive::new(file)
                    .map_err(|e| PkgError::Extract(format!("Invalid zip: {}", e)))?;
                archive
                    .extract(into)
                    .map_err(|e| PkgError::Extract(format!("Extract failed: {}", e)))
            }
        }
    }
}

impl Default for PackageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn staging_dir(dest: &Path) -> PkgResult<PathBuf> {
    let parent = dest
        .parent()
        .ok_or_else(|| PkgError::Path(format!("{} has no parent directory", dest.display())))?;
    let name = dest
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    Ok(parent.join(format!(".tmp-{}", name)))
}

/// Move the unpacked tree to `dest`, unwrapping a lone top-level directory
fn move_into_place(staging: &Path, dest: &Path) -> PkgResult<()> {
    let entries: Vec<_> = fs::read_dir(staging)?.collect::<Result<_, _>>()?;

    if let [only] = entries.as_slice() {
        if only.file_type()?.is_dir() {
            fs::rename(only.path(), dest)?;
            return Ok(());
        }
    }

    fs::rename(staging, dest)?;
    Ok(())
}
