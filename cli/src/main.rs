//! AdClick CLI - runs one ledger command against the local data directory.
//!
//! ```text
//! main() -> Cli::parse() -> load_ledger_config() -> FileStore::open(data_dir)
//!                                        |
//!                                        v
//!                      RewardLedger / SessionManager -> render -> stdout
//! ```
//!
//! Every invocation loads persisted state, runs the calendar checks and the
//! requested transition, saves, and prints a summary. Logs go to a file so
//! they never mix with command output.

mod command;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use adclick_config::{LedgerConfig, config_path, load_ledger_config};
use adclick_core::{FileStore, RewardLedger, SessionManager, SystemClock};

use crate::command::{Cli, Command};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: prefer no logs over interleaving them with command output.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.adclick/logs/adclick.log
    if let Some(config_path) = config_path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("adclick.log"));
    }

    // Fallback: ./.adclick/logs/adclick.log
    candidates.push(PathBuf::from(".adclick").join("logs").join("adclick.log"));

    candidates
}

fn main() -> Result<()> {
    let command = Cli::parse().into_command();

    if command == Command::Health {
        println!("{}", render::health());
        return Ok(());
    }

    init_tracing();

    let config = load_ledger_config().context("failed to load configuration")?;
    run(command, &config)
}

fn run(command: Command, config: &LedgerConfig) -> Result<()> {
    let store = FileStore::open(&config.data_dir)
        .with_context(|| format!("failed to open data directory {}", config.data_dir.display()))?;
    tracing::debug!(dir = %store.dir().display(), ?command, "Running command");

    match command {
        Command::Login { username } => {
            let mut session = SessionManager::open(store)?;
            session.login(&username)?;
            if let Some(name) = session.current().username() {
                println!("Signed in as {name}");
            }
            return Ok(());
        }
        Command::Logout => {
            let mut session = SessionManager::open(store)?;
            session.logout()?;
            println!("Signed out");
            return Ok(());
        }
        _ => {}
    }

    let mut ledger = RewardLedger::open(store.clone(), SystemClock, rand::thread_rng(), config)
        .context("failed to load ledger")?;

    match command {
        Command::Status => {
            ledger.initialize()?;
            let session = SessionManager::open(store)?;
            print!(
                "{}",
                render::status(&ledger.today(), &ledger.progress(), session.current())
            );
        }
        Command::Click { id } => {
            let outcome = ledger.click(&id)?;
            println!("{}", render::outcome(&id, &outcome));
            print!("{}", render::summary(&ledger.progress()));
        }
        Command::Reset => {
            ledger.force_regenerate()?;
            println!("Generated a new catalog");
            print!("{}", render::summary(&ledger.progress()));
        }
        Command::Login { .. } | Command::Logout | Command::Health => {}
    }

    Ok(())
}
