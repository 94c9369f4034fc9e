//! Command-line interface for strictly_guess.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Guess - find the secret number
#[derive(Parser, Debug)]
#[command(name = "strictly_guess")]
#[command(about = "Number guessing game in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play games on stdin/stdout until you decline a rematch
    Play {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Print each state change as a JSON line instead of prose
        #[arg(long)]
        json: bool,
    },

    /// Show the difficulty label of a configuration
    Difficulty {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

/// Game settings, layered over an optional TOML file.
#[derive(clap::Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Largest number the secret can be
    #[arg(long)]
    pub range_max: Option<i64>,

    /// Number of guesses per game
    #[arg(long)]
    pub max_attempts: Option<i64>,

    /// Reject guesses already made in the current game
    #[arg(long)]
    pub reject_duplicates: bool,

    /// A correct guess on the last attempt still loses
    #[arg(long)]
    pub final_attempt_forfeits: bool,
}
