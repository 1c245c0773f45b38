use clap::{Args, Parser, Subcommand};
use pkgcache::core::PkgError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "pkgcache")]
#[command(about = "Integrity-verified package archive cache")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ReleaseArgs {
    /// Package name as listed in the index
    package: String,
    /// Path to the package index (JSON)
    #[arg(short, long)]
    index: PathBuf,
    /// Architecture, when several cores share a name
    #[arg(short, long)]
    arch: Option<String>,
    /// Release version (defaults to the latest)
    #[arg(short = 'r', long = "release")]
    release_version: Option<String>,
}

impl From<ReleaseArgs> for cli::ReleaseSelector {
    fn from(args: ReleaseArgs) -> Self {
        Self {
            index: args.index,
            package: args.package,
            arch: args.arch,
            version: args.release_version,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check a cached release archive against its size and checksum
    Check {
        #[command(flatten)]
        release: ReleaseArgs,
        /// Delete the archive if it is invalid
        #[arg(long)]
        purge: bool,
    },
    /// Extract a verified archive and stamp the result
    Install {
        #[command(flatten)]
        release: ReleaseArgs,
        /// Installation directory (must not exist)
        #[arg(short, long)]
        dest: PathBuf,
        /// Fail on files that cannot be read
        #[arg(long)]
        strict: bool,
    },
    /// Record a directory's checksum in its manifest
    Stamp {
        dir: PathBuf,
        /// Fail on files that cannot be read
        #[arg(long)]
        strict: bool,
    },
    /// Check a directory against its manifest
    Verify {
        dir: PathBuf,
        /// Fail on files that cannot be read
        #[arg(long)]
        strict: bool,
    },
    /// Print the checksum of a file in index format
    Hash {
        file: PathBuf,
        /// SHA-256, SHA-1 or MD5
        #[arg(short, long, default_value = "SHA-256")]
        algorithm: String,
    },
    /// Manage the download cache
    #[command(subcommand)]
    Cache(cli::cache::CacheCommands),
}

fn main() -> Result<(), PkgError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { release, purge } => cli::check::run(release.into(), purge),
        Commands::Install { release, dest, strict } => {
            cli::install::run(release.into(), dest, strict)
        }
        Commands::Stamp { dir, strict } => cli::stamp::run(dir, strict),
        Commands::Verify { dir, strict } => cli::verify::run(dir, strict),
        Commands::Hash { file, algorithm } => cli::hash::run(file, algorithm),
        Commands::Cache(cmd) => cli::cache::run(cmd),
    };

    // Display error with helpful suggestions
    if let Err(ref e) = result {
        eprintln!("\n{}", pkgcache::core::format_error_with_help(e));
    }

    result
}
