use pkgcache::core::PkgResult;
use pkgcache::{Checksum, HashAlgorithm};
use std::path::PathBuf;

pub fn run(file: PathBuf, algorithm: String) -> PkgResult<()> {
    let algorithm: HashAlgorithm = algorithm.parse()?;
    let checksum = Checksum::of_file(algorithm, &file)?;
    let size = std::fs::metadata(&file)?.len();

    println!("{}", checksum);
    println!("size: {}", size);
    Ok(())
}
