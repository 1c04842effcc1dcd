//! romdb CLI
//!
//! Look up game metadata in libretro RDB databases by CRC32.

mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::commands::cache::{run_cache_clear, run_cache_fetch, run_cache_list};
use crate::commands::import::run_import;
use crate::commands::lookup::{run_identify, run_lookup};
use crate::commands::stats::run_stats;

#[derive(Parser)]
#[command(name = "romdb")]
#[command(about = "Look up game metadata in RDB databases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where to read the RDB from.
#[derive(Args, Clone)]
#[group(required = true, multiple = false)]
pub(crate) struct SourceArgs {
    /// Decode a local RDB file
    #[arg(short, long)]
    pub(crate) file: Option<PathBuf>,

    /// Use the cached RDB for a system (e.g., "Nintendo - Game Boy"), downloading it if needed
    #[arg(short, long)]
    pub(crate) system: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a game by CRC32
    Lookup {
        /// CRC32 as hex (e.g., b19ed489 or 0xB19ED489)
        crc: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Hash a ROM file and look up its CRC32
    Identify {
        /// ROM file to hash
        rom: PathBuf,

        /// Bytes to skip before hashing (e.g., 16 for an iNES header)
        #[arg(long, default_value_t = 0)]
        skip_header: u64,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Copy a ROM into a directory under its CRC32 and print {"crc", "name"} as JSON
    Import {
        /// ROM file to import
        rom: PathBuf,

        /// Destination directory (created if missing)
        #[arg(short, long)]
        dest: PathBuf,
    },

    /// Show record counts and decode diagnostics
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage cached RDB files
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// List cached RDB files
    List,

    /// Remove all cached RDB files
    Clear,

    /// Download RDB files for the given systems
    Fetch {
        /// System names as used by libretro-database (e.g., "Sega - Game Gear")
        #[arg(required = true)]
        systems: Vec<String>,
    },
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lookup { crc, source } => run_lookup(&crc, &source),
        Commands::Identify {
            rom,
            skip_header,
            source,
        } => run_identify(&rom, skip_header, &source),
        Commands::Import { rom, dest } => run_import(&rom, &dest),
        Commands::Stats { source } => run_stats(&source),
        Commands::Cache { action } => match action {
            CacheAction::List => run_cache_list(),
            CacheAction::Clear => run_cache_clear(),
            CacheAction::Fetch { systems } => run_cache_fetch(&systems),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!(
                "{} {}",
                "\u{2718}".if_supports_color(Stderr, |t| t.red()),
                e
            );
            ExitCode::FAILURE
        }
    }
}
