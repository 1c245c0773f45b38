use std::path::PathBuf;
use thiserror::Error;

pub type PkgResult<T> = Result<T, PkgError>;

#[derive(Error, Debug)]
pub enum PkgError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Invalid checksum format: {0}")]
    InvalidChecksumFormat(String),

    #[error("Invalid hash '{digest}': {source}")]
    InvalidDigest {
        digest: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to compute hash of file {}: {source}", path.display())]
    HashComputation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<PkgError>,
    },

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Package error: {0}")]
    Package(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Extract error: {0}")]
    Extract(String),
}

impl PkgError {
    /// Wrap this error with a short description of the step that failed.
    pub fn context(self, context: impl Into<String>) -> Self {
        PkgError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with every `Context` layer peeled off.
    pub fn root(&self) -> &PkgError {
        match self {
            PkgError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self.root() {
            PkgError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            PkgError::ManifestNotFound(_) => true,
            _ => false,
        }
    }
}

/// Adds `.context(...)` to any `PkgResult`.
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> PkgResult<T>;
}

impl<T, E: Into<PkgError>> ResultExt<T> for Result<T, E> {
    fn context(self, context: impl Into<String>) -> PkgResult<T> {
        self.map_err(|e| e.into().context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_context_keeps_root_cause() {
        let err: PkgResult<()> = Err(PkgError::UnsupportedAlgorithm("FOO".to_string()));
        let err = err.context("testing archive checksum").unwrap_err();

        assert_eq!(
            err.to_string(),
            "testing archive checksum: Unsupported hash algorithm: FOO"
        );
        assert!(matches!(err.root(), PkgError::UnsupportedAlgorithm(name) if name == "FOO"));
    }

    #[test]
    fn test_is_not_found() {
        let missing: PkgError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(missing.context("reading").is_not_found());

        let denied: PkgError = io::Error::new(io::ErrorKind::PermissionDenied, "no").into();
        assert!(!denied.is_not_found());
    }
}
