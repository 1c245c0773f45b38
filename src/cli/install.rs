use super::{manifest_verifier, ReleaseSelector};
use pkgcache::cache::Cache;
use pkgcache::config::Config;
use pkgcache::core::PkgResult;
use pkgcache::package::PackageInstaller;
use std::path::PathBuf;

pub fn run(selector: ReleaseSelector, dest: PathBuf, strict: bool) -> PkgResult<()> {
    let config = Config::load()?;
    let cache = Cache::from_config(&config)?;
    let release = selector.resolve()?;

    let installer = PackageInstaller::new(manifest_verifier(&config, strict));
    installer.install(&cache.locate(&release.resource), &dest)?;

    println!(
        "✓ Installed {} {} into {}",
        selector.package,
        release.version,
        dest.display()
    );
    Ok(())
}
