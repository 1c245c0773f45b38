//! Remote resources and the capability of locating their cached archive.

use crate::core::{PkgError, PkgResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Component, Path, PathBuf};

/// Anything the integrity checker can validate: an expected checksum and
/// size, plus a way to find the local copy of the archive.
pub trait ArchiveResource {
    /// Expected checksum as `"<ALGO>:<hex digest>"`.
    fn checksum(&self) -> &str;

    /// Expected archive length in bytes.
    fn size(&self) -> u64;

    /// Where the cached archive lives (or would live once downloaded).
    fn archive_path(&self) -> PkgResult<PathBuf>;
}

/// A downloadable archive as described by a package index entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResource {
    pub url: String,
    pub archive_file_name: String,
    pub checksum: String,
    #[serde(deserialize_with = "deserialize_size")]
    pub size: u64,
    /// Sub-directory of the download cache the archive is stored in
    #[serde(default = "default_cache_path")]
    pub cache_path: String,
}

fn default_cache_path() -> String {
    "packages".to_string()
}

/// Index files in the wild publish sizes both as numbers and as strings.
fn deserialize_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Number(u64),
        Text(String),
    }

    match Size::deserialize(deserializer)? {
        Size::Number(n) => Ok(n),
        Size::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid archive size: {:?}", s))),
    }
}

impl DownloadResource {
    /// Resolve the archive location below a download cache root:
    /// `<downloads>/<cache_path>/<archive_file_name>`.
    ///
    /// Both components come from a remote index, so they must stay inside
    /// the cache: absolute paths and `..` are rejected.
    pub fn archive_path_in(&self, downloads_dir: &Path) -> PkgResult<PathBuf> {
        if self.archive_file_name.is_empty() {
            return Err(PkgError::Path(format!(
                "Resource {} has an empty archive file name",
                self.url
            )));
        }
        check_relative(&self.cache_path)?;
        check_relative(&self.archive_file_name)?;

        Ok(downloads_dir
            .join(&self.cache_path)
            .join(&self.archive_file_name))
    }
}

fn check_relative(part: &str) -> PkgResult<()> {
    let escapes = Path::new(part)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(PkgError::Path(format!(
            "Refusing to resolve '{}' outside the download cache",
            part
        )));
    }
    Ok(())
}

/// A [`DownloadResource`] bound to a concrete download cache directory.
#[derive(Debug, Clone)]
pub struct CachedArchive<'a> {
    resource: &'a DownloadResource,
    downloads_dir: PathBuf,
}

impl<'a> CachedArchive<'a> {
    pub fn new(resource: &'a DownloadResource, downloads_dir: PathBuf) -> Self {
        Self {
            resource,
            downloads_dir,
        }
    }
}

impl ArchiveResource for CachedArchive<'_> {
    fn checksum(&self) -> &str {
        &self.resource.checksum
    }

    fn size(&self) -> u64 {
        self.resource.size
    }

    fn archive_path(&self) -> PkgResult<PathBuf> {
        self.resource.archive_path_in(&self.downloads_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(cache_path: &str, file: &str) -> DownloadResource {
        DownloadResource {
            url: "https://example.com/avr-1.8.3.tar.bz2".to_string(),
            archive_file_name: file.to_string(),
            checksum: "SHA-256:00".to_string(),
            size: 1,
            cache_path: cache_path.to_string(),
        }
    }

    #[test]
    fn test_archive_path_in() {
        let res = resource("packages", "avr-1.8.3.tar.bz2");
        let path = res.archive_path_in(Path::new("/cache/downloads")).unwrap();
        assert_eq!(path, PathBuf::from("/cache/downloads/packages/avr-1.8.3.tar.bz2"));
    }

    #[test]
    fn test_archive_path_rejects_escapes() {
        let root = Path::new("/cache/downloads");
        assert!(resource("packages", "../evil.tar.gz").archive_path_in(root).is_err());
        assert!(resource("/etc", "passwd").archive_path_in(root).is_err());
        assert!(resource("packages", "").archive_path_in(root).is_err());
    }

    #[test]
    fn test_deserialize_size_as_number_or_string() {
        let json = r#"{"url":"u","archiveFileName":"a.zip","checksum":"MD5:00","size":"42"}"#;
        let res: DownloadResource = serde_json::from_str(json).unwrap();
        assert_eq!(res.size, 42);
        assert_eq!(res.cache_path, "packages");

        let json = r#"{"url":"u","archiveFileName":"a.zip","checksum":"MD5:00","size":7}"#;
        let res: DownloadResource = serde_json::from_str(json).unwrap();
        assert_eq!(res.size, 7);

        let json = r#"{"url":"u","archiveFileName":"a.zip","checksum":"MD5:00","size":"big"}"#;
        assert!(serde_json::from_str::<DownloadResource>(json).is_err());
    }

    #[test]
    fn test_cached_archive_resolves_through_resource() {
        let res = resource("tools", "gcc.tar.gz");
        let cached = CachedArchive::new(&res, PathBuf::from("/c"));
        assert_eq!(cached.archive_path().unwrap(), PathBuf::from("/c/tools/gcc.tar.gz"));
        assert_eq!(cached.size(), 1);
        assert_eq!(cached.checksum(), "SHA-256:00");
    }
}
