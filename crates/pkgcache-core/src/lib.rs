// Core functionality
pub mod core;

// Checksum parsing and streaming hashes
pub mod checksum;

// Re-export commonly used types
pub use crate::checksum::{Checksum, HashAlgorithm};
pub use crate::core::{format_error_with_help, ErrorHelp, PkgError, PkgResult, ResultExt};
