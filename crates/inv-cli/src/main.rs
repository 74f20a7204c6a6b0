//! CLI frontend for the alien invasion simulator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "invasion",
    about = "Unleash aliens on a map of cities and watch the world burn",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an invasion on a map file
    Simulate {
        /// Map file, one city per line
        map: PathBuf,

        /// Number of aliens to unleash
        #[arg(short = 'n', long)]
        aliens: usize,

        /// Maximum number of steps before the invasion stops
        #[arg(long, default_value_t = inv_simulation::config::DEFAULT_MAX_STEPS)]
        steps: u64,

        /// RNG seed for a reproducible invasion
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output format for the surviving world
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Print every event, not just destroyed cities
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a map file and report its size
    Check {
        /// Map file to validate
        map: PathBuf,
    },

    /// Display the cities of a map and their roads
    Show {
        /// Map file to display
        map: PathBuf,

        /// Only show this city
        city: Option<String>,
    },
}

/// Output format of `simulate`.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Map-file lines under a header
    Text,
    /// The report as pretty-printed JSON
    Json,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            map,
            aliens,
            steps,
            seed,
            format,
            verbose,
        } => commands::simulate::run(&map, aliens, steps, seed, format, verbose),
        Commands::Check { map } => commands::check::run(&map),
        Commands::Show { map, city } => commands::show::run(&map, city.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
