//! pkgcache: an integrity-verified cache for downloaded package archives
//!
//! This crate re-exports the error, path and checksum primitives of
//! `pkgcache-core` and adds the download cache, the archive integrity
//! checker, directory manifests, the package index model and installation.

pub use pkgcache_core::{format_error_with_help, Checksum, ErrorHelp, HashAlgorithm, PkgError, PkgResult};

/// Core module re-exported from `pkgcache-core`.
pub mod core {
    pub use pkgcache_core::core::*;
    pub use pkgcache_core::*;
}

/// Configuration management.
pub mod config;

/// Download cache layout.
pub mod cache;

/// Remote resources and archive path resolution.
pub mod resource;

/// Package index model.
pub mod index;

/// Integrity checks, directory manifests and installation.
pub mod package;
