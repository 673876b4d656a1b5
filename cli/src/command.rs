//! Argument parsing.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "adclick")]
#[command(about = "Click through this month's catalog and collect daily rewards")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// The requested command; `status` when none was given.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the catalog and today's progress
    Status,
    /// Click a product
    Click {
        /// Item id, e.g. tech-3
        id: String,
    },
    /// Generate a new catalog and zero every counter
    Reset,
    /// Record who is using this ledger
    Login {
        /// Display name; surrounding whitespace is dropped
        username: String,
    },
    /// Clear the signed-in user
    Logout,
    /// Print a JSON liveness report
    Health,
}
