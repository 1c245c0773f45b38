use crate::core::checksum::{hash_reader, Checksum};
use crate::core::{PkgError, PkgResult, ResultExt};
use crate::resource::ArchiveResource;
use std::fs::{self, File};
use std::io::ErrorKind;

/// Where a cached archive stands after [`ArchiveIntegrityChecker::status`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveStatus {
    /// Nothing at the archive path yet
    Absent,
    /// Present but the size or checksum does not match
    Invalid,
    /// Present and matching both size and checksum
    Valid,
}

/// Validates a cached archive against the checksum and size its resource
/// advertises
///
/// Every check resolves the archive path through the resource and touches
/// the filesystem afresh; nothing is remembered between calls.
pub struct ArchiveIntegrityChecker<'a, R: ArchiveResource + ?Sized> {
    resource: &'a R,
}

impl<'a, R: ArchiveResource + ?Sized> ArchiveIntegrityChecker<'a, R> {
    pub fn new(resource: &'a R) -> Self {
        Self { resource }
    }

    /// Whether a file exists at the archive path
    ///
    /// Only a missing file yields `Ok(false)`; permission or I/O problems
    /// are errors.
    pub fn is_cached(&self) -> PkgResult<bool> {
        let archive_path = self.resource.archive_path().context("getting archive path")?;

        match fs::metadata(&archive_path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PkgError::from(e).context("checking archive existence")),
        }
    }

    /// Whether the archive hashes to the resource's checksum
    pub fn verify_checksum(&self) -> PkgResult<bool> {
        let expected = Checksum::parse(self.resource.checksum())?;
        let archive_path = self.resource.archive_path().context("getting archive path")?;

        let mut file = File::open(&archive_path).context("opening archive file")?;
        let mut hasher = expected.algorithm.hasher();
        hash_reader(hasher.as_mut(), &mut file).map_err(|source| PkgError::HashComputation {
            path: archive_path.clone(),
            source,
        })?;
        let actual = hasher.finalize();

        let matches = *actual == *expected.digest;
        if !matches {
            tracing::warn!(
                path = %archive_path.display(),
                expected = %expected,
                actual = %hex::encode(&actual),
                "archive checksum mismatch"
            );
        }
        Ok(matches)
    }

    /// Whether the archive is exactly as long as the resource says
    pub fn verify_size(&self) -> PkgResult<bool> {
        let archive_path = self.resource.archive_path().context("getting archive path")?;
        let metadata = fs::metadata(&archive_path).context("getting archive info")?;

        let matches = metadata.len() == self.resource.size();
        if !matches {
            tracing::warn!(
                path = %archive_path.display(),
                expected = self.resource.size(),
                actual = metadata.len(),
                "archive size mismatch"
            );
        }
        Ok(matches)
    }

    /// Presence, then size, then checksum
    ///
    /// Stops at the first check that fails, so a missing archive is never
    /// opened and a truncated one is never hashed.
    pub fn verify_integrity(&self) -> PkgResult<bool> {
        Ok(self.status()? == ArchiveStatus::Valid)
    }

    /// [`verify_integrity`](Self::verify_integrity) as a three-way state
    pub fn status(&self) -> PkgResult<ArchiveStatus> {
        if !self.is_cached().context("testing if archive is cached")? {
            tracing::debug!("archive not cached");
            return Ok(ArchiveStatus::Absent);
        }

        if !self.verify_size().context("testing archive size")? {
            return Ok(ArchiveStatus::Invalid);
        }

        if self.verify_checksum().context("testing archive checksum")? {
            Ok(ArchiveStatus::Valid)
        } else {
            Ok(ArchiveStatus::Invalid)
        }
    }
}
