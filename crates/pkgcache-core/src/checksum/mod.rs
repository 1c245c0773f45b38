//! Checksum primitives shared by the archive checker and the directory
//! manifest.
//!
//! Index entries carry checksums as `"<ALGO>:<hex digest>"` where the
//! algorithm names follow the Java `MessageDigest` standard names
//! (`SHA-256`, `SHA-1`, `MD5`).

use crate::core::{PkgError, PkgResult, ResultExt};
use digest::DynDigest;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

const BUF_SIZE: usize = 64 * 1024;

/// Hash algorithms accepted in index checksums.
///
/// New algorithms are added as new named variants; the algorithm is never
/// inferred from the digest length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha1,
    Md5,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 3] = [HashAlgorithm::Sha256, HashAlgorithm::Sha1, HashAlgorithm::Md5];

    /// The tag used in `"<ALGO>:<hex>"` strings.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Md5 => "MD5",
        }
    }

    /// A fresh hasher for this algorithm.
    pub fn hasher(self) -> Box<dyn DynDigest> {
        match self {
            HashAlgorithm::Sha256 => Box::new(sha2::Sha256::default()),
            HashAlgorithm::Sha1 => Box::new(sha1::Sha1::default()),
            HashAlgorithm::Md5 => Box::new(md5::Md5::default()),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = PkgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHA-256" => Ok(HashAlgorithm::Sha256),
            "SHA-1" => Ok(HashAlgorithm::Sha1),
            "MD5" => Ok(HashAlgorithm::Md5),
            other => Err(PkgError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed `"<ALGO>:<hex digest>"` checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    pub algorithm: HashAlgorithm,
    pub digest: Vec<u8>,
}

impl Checksum {
    /// Parse a checksum string from an index.
    ///
    /// The string is split on the first `:`. The digest is decoded before the
    /// algorithm is looked up, so `"FOO:zz"` reports the bad hex.
    pub fn parse(s: &str) -> PkgResult<Self> {
        let (algo, hex_digest) = s
            .split_once(':')
            .ok_or_else(|| PkgError::InvalidChecksumFormat(s.to_string()))?;

        let digest = hex::decode(hex_digest).map_err(|source| PkgError::InvalidDigest {
            digest: hex_digest.to_string(),
            source,
        })?;

        let algorithm = algo.parse()?;

        Ok(Self { algorithm, digest })
    }

    /// Hash a file with `algorithm` and return its checksum.
    pub fn of_file(algorithm: HashAlgorithm, path: &Path) -> PkgResult<Self> {
        let mut file =
            File::open(path).context(format!("opening {}", path.display()))?;
        let mut hasher = algorithm.hasher();
        hash_reader(hasher.as_mut(), &mut file).map_err(|source| PkgError::HashComputation {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            algorithm,
            digest: hasher.finalize().into_vec(),
        })
    }

    /// Lowercase hex of the digest bytes.
    pub fn hex(&self) -> String {
        hex::encode(&self.digest)
    }
}

impl FromStr for Checksum {
    type Err = PkgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Checksum::parse(s)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex())
    }
}

/// Stream everything `reader` yields into `hasher`, returning the byte count.
///
/// Reads in fixed-size chunks so memory use stays bounded for large archives.
pub fn hash_reader<R: Read + ?Sized>(hasher: &mut dyn DynDigest, reader: &mut R) -> io::Result<u64> {
    let mut buf = vec![0u8; BUF_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
        total += n as u64;
    }
    Ok(total)
}
