//! Strictly Guess - terminal driver
//!
//! Reads guesses from stdin and renders the engine's feedback.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, SettingsArgs};
use std::io::{self, BufRead, Write};
use strictly_guess::{
    FinalAttemptRule, GameConfig, GameSettings, GuessingEngine, SharedStats, Status,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { settings, json } => play(resolve_config(&settings)?, json),
        Command::Difficulty { settings } => {
            let config = resolve_config(&settings)?;
            println!(
                "range 1..={} with {} attempt(s): {}",
                config.range_max(),
                config.max_attempts(),
                config.difficulty()
            );
            Ok(())
        }
    }
}

/// Merges the settings file with command-line overrides and validates.
#[instrument]
fn resolve_config(args: &SettingsArgs) -> Result<GameConfig> {
    let mut settings = match &args.config {
        Some(path) => GameSettings::from_file(path)?,
        None => GameSettings::default(),
    };

    if let Some(range_max) = args.range_max {
        settings.range_max = range_max;
    }
    if let Some(max_attempts) = args.max_attempts {
        settings.max_attempts = max_attempts;
    }
    if args.reject_duplicates {
        settings.reject_duplicates = true;
    }
    if args.final_attempt_forfeits {
        settings.final_attempt = FinalAttemptRule::Forfeits;
    }

    Ok(settings.validate()?)
}

/// Runs games until stdin closes or the player declines a rematch.
#[instrument]
fn play(config: GameConfig, json: bool) -> Result<()> {
    let stats = SharedStats::new();
    let mut engine = GuessingEngine::new().with_stats(stats.clone());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    info!("Starting play loop");

    loop {
        let mut session = engine.new_session(config);
        if json {
            emit_json(&engine.snapshot(&session))?;
        } else {
            println!(
                "I'm thinking of a number between 1 and {}. You have {} attempt(s). ({})",
                config.range_max(),
                config.max_attempts(),
                config.difficulty()
            );
        }

        while !session.is_resolved() {
            prompt(json, "Your guess: ")?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line.context("Failed to read guess")?;

            match engine.submit_guess(&mut session, &line) {
                Ok(outcome) if json => emit_json(&outcome)?,
                Ok(outcome) => {
                    println!("{}", outcome);
                    if let (Status::Active, Some((low, high))) =
                        (session.status(), session.bracket())
                    {
                        println!("Hint: the secret is between {} and {}.", low, high);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Guess rejected");
                    if json {
                        emit_json(&serde_json::json!({ "error": e.to_string() }))?;
                    } else {
                        println!("{}", e);
                    }
                }
            }
        }

        let lifetime = stats.snapshot();
        if json {
            emit_json(&engine.snapshot(&session))?;
        } else {
            println!(
                "Played {} | won {} | win rate {:.1}% | best {} | tier {}",
                lifetime.games_played(),
                lifetime.games_won(),
                lifetime.win_rate(),
                (*lifetime.best_attempts())
                    .map_or_else(|| "-".to_string(), |best| best.to_string()),
                lifetime.tier()
            );
        }

        prompt(json, "Play again? [y/N] ")?;
        let again = match lines.next() {
            Some(answer) => answer
                .context("Failed to read answer")?
                .trim()
                .eq_ignore_ascii_case("y"),
            None => false,
        };
        if !again {
            return Ok(());
        }
    }
}

fn prompt(json: bool, text: &str) -> Result<()> {
    if !json {
        print!("{}", text);
        io::stdout().flush()?;
    }
    Ok(())
}

fn emit_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
