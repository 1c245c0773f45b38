use crate::core::PkgError;

/// Provides helpful suggestions for common errors
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for PkgError {
    fn help(&self) -> Option<String> {
        match self {
            PkgError::Context { source, .. } => source.help(),
            PkgError::InvalidChecksumFormat(_) | PkgError::InvalidDigest { .. } => Some(
                "💡 Suggestion: Checksums must look like 'SHA-256:<hex digest>'. Check the package index entry"
                    .to_string(),
            ),
            PkgError::UnsupportedAlgorithm(_) => Some(
                "💡 Suggestion: Supported algorithms are SHA-256, SHA-1 and MD5 (names are case-sensitive)"
                    .to_string(),
            ),
            PkgError::ManifestNotFound(_) => Some(
                "💡 Suggestion: The directory has never been stamped. Run 'pkgcache stamp <dir>' after installing"
                    .to_string(),
            ),
            PkgError::HashComputation { .. } => Some(
                "💡 Suggestion: A file could not be read while hashing. Check the disk and file permissions"
                    .to_string(),
            ),
            PkgError::Package(msg) => {
                if msg.contains("not found in index") {
                    Some(
                        "💡 Suggestion: Check the package name and architecture, or update your index file"
                            .to_string(),
                    )
                } else if msg.contains("is not cached") {
                    Some(
                        "💡 Suggestion: Download the archive into the cache first, then re-run the command"
                            .to_string(),
                    )
                } else if msg.contains("failed integrity") {
                    Some(
                        "💡 Suggestion: The cached archive is corrupt. Run 'pkgcache check --purge' and download it again"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            PkgError::Path(msg) => {
                if msg.contains("Could not determine") {
                    Some(
                        "💡 Suggestion: Check your system environment variables (HOME, APPDATA, etc.)"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            PkgError::Yaml(e) => Some(format!(
                "💡 Suggestion: Check your YAML syntax. Common issues:\n  - Missing colons after keys\n  - Incorrect indentation\n  - Unclosed quotes\n\nError details: {}",
                e
            )),
            PkgError::Io(e) => {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    Some(
                        "💡 Suggestion: Check file permissions, or try running with appropriate permissions"
                            .to_string(),
                    )
                } else if e.kind() == std::io::ErrorKind::NotFound {
                    Some(
                        "💡 Suggestion: The file or directory may not exist. Check the path and try again"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Format an error with helpful suggestions
pub fn format_error_with_help(error: &PkgError) -> String {
    let mut output = format!("❌ Error: {}", error);

    if let Some(help) = error.help() {
        output.push_str("\n\n");
        output.push_str(&help);
    }

    output
}
