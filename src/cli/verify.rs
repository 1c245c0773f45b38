use super::manifest_verifier;
use pkgcache::config::Config;
use pkgcache::core::{PkgError, PkgResult};
use std::path::PathBuf;

pub fn run(dir: PathBuf, strict: bool) -> PkgResult<()> {
    let config = Config::load()?;

    if manifest_verifier(&config, strict).verify(&dir)? {
        println!("✓ {} matches its manifest", dir.display());
        Ok(())
    } else {
        println!("❌ {} has changed since it was stamped", dir.display());
        Err(PkgError::Package(format!(
            "Directory checksum mismatch for {}",
            dir.display()
        )))
    }
}
