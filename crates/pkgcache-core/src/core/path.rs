use crate::core::error::{PkgError, PkgResult};
use std::path::{Path, PathBuf};

/// Get the pkgcache home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\pkgcache
/// - Linux: ~/.config/pkgcache
/// - macOS: ~/Library/Application Support/pkgcache
pub fn pkgcache_home() -> PkgResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| PkgError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("pkgcache"))
}

/// Get the cache directory
///
/// Platform-specific locations:
/// - Windows: %LOCALAPPDATA%\pkgcache
/// - Linux: ~/.cache/pkgcache
/// - macOS: ~/Library/Caches/pkgcache
pub fn cache_dir() -> PkgResult<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| PkgError::Path("Could not determine cache directory".to_string()))?;
    Ok(cache_dir.join("pkgcache"))
}

/// Get the config file path (`<pkgcache home>/config.yaml`)
pub fn config_file() -> PkgResult<PathBuf> {
    Ok(pkgcache_home()?.join("config.yaml"))
}

/// Create a directory (and its parents) if it does not exist yet
pub fn ensure_dir(path: &Path) -> PkgResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| {
            PkgError::Path(format!("Failed to create directory {}: {}", path.display(), e))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Idempotent
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_config_file_name() {
        if let Ok(path) = config_file() {
            assert!(path.ends_with("pkgcache/config.yaml"));
        }
    }
}
