//! CLI frontend for the AU text RPG.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "au-rpg",
    about = "AU RPG: a branching text adventure with turn-based combat",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game on the terminal
    Play {
        /// Save file to read and write
        #[arg(long, default_value = "savegame.json")]
        save: PathBuf,

        /// RNG seed for a reproducible playthrough (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// JSON file overriding combat balance numbers
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Skip the title menu and load the save file
        #[arg(short, long = "continue")]
        resume: bool,
    },

    /// List the playable characters
    Roster {
        /// JSON file overriding combat balance numbers
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Summarize a save file without playing
    Inspect {
        /// Save file to read
        #[arg(long, default_value = "savegame.json")]
        save: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            save,
            seed,
            rules,
            resume,
        } => commands::play::run(&save, seed, rules.as_deref(), resume),
        Commands::Roster { rules } => commands::roster::run(rules.as_deref()),
        Commands::Inspect { save } => commands::inspect::run(&save),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
