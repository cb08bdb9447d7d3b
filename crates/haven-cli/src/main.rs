use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use haven_cli::{assess, config, journal};
use haven_core::models::Mood;
use haven_instruments::AssessmentEngine;
use haven_journal::JournalStore;
use haven_storage::FileStore;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Private wellness check-ins and journal.
#[derive(Debug, Parser)]
#[command(name = "haven", version)]
struct Cli {
    /// Directory holding journal data, overriding the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Take the wellness check-in.
    Assess {
        /// Seed the question sampling, for a reproducible session.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Read and write journal entries.
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },
    /// Inspect or create the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum JournalAction {
    /// List entries, newest first.
    List,
    /// Print one entry.
    Show { id: String },
    /// Write a new entry.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long, default_value = "okay")]
        mood: Mood,
    },
    /// Replace an entry's title, body and mood.
    Edit {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        mood: Mood,
    },
    /// Delete an entry.
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective config.
    Show,
    /// Write a default config file if none exists.
    Init,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut cfg = config::load_or_default()?;
    if let Some(dir) = cli.data_dir {
        cfg.data_dir = dir;
    }

    let stdout = io::stdout();
    match cli.command {
        Command::Assess { seed } => {
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let mut engine = AssessmentEngine::for_instrument(&cfg.instrument_id, rng)?;
            assess::run_assessment(&mut engine, io::stdin().lock(), stdout.lock())?;
        }
        Command::Journal { action } => {
            let mut store = JournalStore::new(FileStore::open(&cfg.data_dir)?);
            let out = stdout.lock();
            match action {
                JournalAction::List => journal::list(&store, out)?,
                JournalAction::Show { id } => journal::show(&store, &id, out)?,
                JournalAction::Add { title, body, mood } => {
                    journal::add(&mut store, &title, &body, mood, out)?;
                }
                JournalAction::Edit {
                    id,
                    title,
                    body,
                    mood,
                } => {
                    journal::edit(&mut store, &id, &title, &body, mood, out)?;
                }
                JournalAction::Delete { id } => journal::delete(&mut store, &id, out)?,
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            }
            ConfigAction::Init => {
                if config::has_config() {
                    println!("Config already exists at {}", config::config_path()?.display());
                } else {
                    let path = config::save_config(&cfg)?;
                    println!("Wrote config to {}", path.display());
                }
            }
        },
    }

    Ok(())
}
