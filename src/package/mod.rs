pub mod extractor;
pub mod installer;
pub mod integrity;
pub mod manifest;

pub use extractor::PackageExtractor;
pub use installer::PackageInstaller;
pub use integrity::{ArchiveIntegrityChecker, ArchiveStatus};
pub use manifest::{DirectoryManifestVerifier, PackageManifest, WalkPolicy, MANIFEST_FILE_NAME};
