use crate::core::path::{config_file, ensure_dir};
use crate::core::{PkgError, PkgResult};
use crate::package::manifest::WalkPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Cache directory (defaults to platform-specific cache directory)
    ///
    /// Default locations:
    /// - Windows: %LOCALAPPDATA%\pkgcache
    /// - Linux: ~/.cache/pkgcache
    /// - macOS: ~/Library/Caches/pkgcache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,

    /// What to do with files that cannot be opened while checksumming an
    /// installed directory: `lenient` skips them, `strict` fails
    #[serde(default)]
    pub walk_policy: WalkPolicy,

    /// Delete cached archives that fail their integrity check
    #[serde(default)]
    pub purge_invalid_archives: bool,
}

impl Config {
    /// Load config from the platform-specific config directory, creating a
    /// default one if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\pkgcache\config.yaml
    /// - Linux: ~/.config/pkgcache/config.yaml
    /// - macOS: ~/Library/Application Support/pkgcache/config.yaml
    pub fn load() -> PkgResult<Self> {
        Self::load_from(&config_file()?)
    }

    /// Load config from an explicit path, creating a default one if missing
    pub fn load_from(config_path: &Path) -> PkgResult<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(config_path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| PkgError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save config to the platform-specific config directory
    pub fn save(&self) -> PkgResult<()> {
        self.save_to(&config_file()?)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, config_path: &Path) -> PkgResult<()> {
        if let Some(config_dir) = config_path.parent() {
            ensure_dir(config_dir)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| PkgError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the cache directory path
    pub fn get_cache_dir(&self) -> PkgResult<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            Ok(PathBuf::from(dir))
        } else {
            crate::core::path::cache_dir()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.walk_policy, WalkPolicy::Lenient);
        assert!(config.cache_dir.is_none());
        assert!(!config.purge_invalid_archives);
    }

    #[test]
    fn test_load_from_creates_default() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("nested").join("config.yaml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert!(config_path.exists());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");

        let config = Config {
            cache_dir: Some("/var/cache/pkgs".to_string()),
            walk_policy: WalkPolicy::Strict,
            purge_invalid_archives: true,
        };
        config.save_to(&config_path).unwrap();

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get_cache_dir().unwrap(), PathBuf::from("/var/cache/pkgs"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        fs::write(&config_path, "walk_policy: strict\n").unwrap();

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded.walk_policy, WalkPolicy::Strict);
        assert!(!loaded.purge_invalid_archives);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        fs::write(&config_path, "walk_policy: sometimes\n").unwrap();

        assert!(matches!(
            Config::load_from(&config_path),
            Err(PkgError::Config(_))
        ));
    }
}
