use crate::config::Config;
use crate::core::path::{cache_dir, ensure_dir};
use crate::core::{PkgError, PkgResult};
use crate::resource::{CachedArchive, DownloadResource};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Download cache layout
///
/// Archives live at `<root>/downloads/<cache_path>/<archive_file_name>`.
/// The cache never fetches anything itself; a downloader drops files into
/// the paths handed out here and the integrity checker validates them.
#[derive(Debug, Clone)]
pub struct Cache {
    root: PathBuf,
}

impl Cache {
    /// Create a new cache instance
    pub fn new(cache_root: PathBuf) -> PkgResult<Self> {
        ensure_dir(&cache_root)?;
        Ok(Self { root: cache_root })
    }

    /// Get the default cache directory
    pub fn default_cache() -> PkgResult<Self> {
        Self::new(cache_dir()?)
    }

    /// Open the cache configured in `config`
    pub fn from_config(config: &Config) -> PkgResult<Self> {
        Self::new(config.get_cache_dir()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the downloads directory
    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join("downloads")
    }

    /// Bind a resource to this cache so it can be checked
    pub fn locate<'a>(&self, resource: &'a DownloadResource) -> CachedArchive<'a> {
        CachedArchive::new(resource, self.downloads_dir())
    }

    /// Get the cached path for a resource's archive
    pub fn archive_path(&self, resource: &DownloadResource) -> PkgResult<PathBuf> {
        resource.archive_path_in(&self.downloads_dir())
    }

    /// Delete a cached archive
    ///
    /// Returns `false` when there was nothing to delete.
    pub fn remove_archive(&self, resource: &DownloadResource) -> PkgResult<bool> {
        let path = self.archive_path(resource)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "removed cached archive");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PkgError::Cache(format!(
                "Failed to remove cached archive {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Remove every downloaded archive
    pub fn clean(&self) -> PkgResult<CacheCleanResult> {
        let dir = self.downloads_dir();
        if !dir.exists() {
            return Ok(CacheCleanResult::default());
        }

        let mut result = CacheCleanResult::default();
        for entry in WalkDir::new(&dir).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() {
                if let Ok(metadata) = entry.metadata() {
                    result.files_removed += 1;
                    result.bytes_freed += metadata.len();
                }
            }
        }

        fs::remove_dir_all(&dir).map_err(|e| {
            PkgError::Cache(format!("Failed to clean cache {}: {}", dir.display(), e))
        })?;
        tracing::info!(
            files = result.files_removed,
            bytes = result.bytes_freed,
            "cleaned download cache"
        );

        Ok(result)
    }
}

/// Result of cache cleaning operation
#[derive(Debug, Default)]
pub struct CacheCleanResult {
    pub files_removed: usize,
    pub bytes_freed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ArchiveResource;
    use tempfile::TempDir;

    fn resource() -> DownloadResource {
        DownloadResource {
            url: "https://example.com/core-1.0.0.zip".to_string(),
            archive_file_name: "core-1.0.0.zip".to_string(),
            checksum: "MD5:d41d8cd98f00b204e9800998ecf8427e".to_string(),
            size: 0,
            cache_path: "packages".to_string(),
        }
    }

    #[test]
    fn test_locate_uses_downloads_dir() {
        let temp = TempDir::new().unwrap();
        let cache = Cache::new(temp.path().to_path_buf()).unwrap();
        let res = resource();

        let located = cache.locate(&res);
        assert_eq!(
            located.archive_path().unwrap(),
            temp.path().join("downloads/packages/core-1.0.0.zip")
        );
    }

    #[test]
    fn test_remove_archive() {
        let temp = TempDir::new().unwrap();
        let cache = Cache::new(temp.path().to_path_buf()).unwrap();
        let res = resource();

        assert!(!cache.remove_archive(&res).unwrap());

        let path = cache.archive_path(&res).unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();

        assert!(cache.remove_archive(&res).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_clean_counts_files_and_bytes() {
        let temp = TempDir::new().unwrap();
        let cache = Cache::new(temp.path().to_path_buf()).unwrap();
        let packages = cache.downloads_dir().join("packages");
        fs::create_dir_all(&packages).unwrap();
        fs::write(packages.join("a.zip"), b"12345").unwrap();
        fs::write(packages.join("b.zip"), b"123").unwrap();

        let result = cache.clean().unwrap();
        assert_eq!(result.files_removed, 2);
        assert_eq!(result.bytes_freed, 8);
        assert!(!cache.downloads_dir().exists());

        // Cleaning an empty cache is a no-op
        let result = cache.clean().unwrap();
        assert_eq!(result.files_removed, 0);
    }
}
