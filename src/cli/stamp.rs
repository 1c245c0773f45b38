use super::manifest_verifier;
use pkgcache::config::Config;
use pkgcache::core::PkgResult;
use pkgcache::package::PackageManifest;
use std::path::PathBuf;

pub fn run(dir: PathBuf, strict: bool) -> PkgResult<()> {
    let config = Config::load()?;
    manifest_verifier(&config, strict).stamp(&dir)?;

    let manifest = PackageManifest::load(&dir)?;
    println!("✓ Stamped {} ({})", dir.display(), manifest.checksum);
    Ok(())
}
