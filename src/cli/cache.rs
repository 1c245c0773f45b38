use clap::Subcommand;
use pkgcache::cache::Cache;
use pkgcache::config::Config;
use pkgcache::core::PkgResult;

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Delete every downloaded archive
    Clean,
    /// Print the cache directory
    Path,
}

pub fn run(cmd: CacheCommands) -> PkgResult<()> {
    let config = Config::load()?;
    let cache = Cache::from_config(&config)?;

    match cmd {
        CacheCommands::Clean => {
            let result = cache.clean()?;
            println!(
                "✓ Removed {} file(s), freed {} byte(s)",
                result.files_removed, result.bytes_freed
            );
        }
        CacheCommands::Path => println!("{}", cache.root().display()),
    }
    Ok(())
}
