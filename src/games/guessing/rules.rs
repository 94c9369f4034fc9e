//! Game rules for the guessing game.
//!
//! Pure functions over a secret, a guess and the attempt count. They hold
//! no state, so contracts, invariants and proofs can all call them.

use super::config::{FinalAttemptRule, GameConfig};
use super::types::{GuessRecord, Outcome, Secret};
use tracing::instrument;

/// Classifies an accepted guess.
///
/// `attempts_used` already counts this guess. Priority order: a match wins,
/// then an exhausted budget loses, then the direction is reported. Under
/// [`FinalAttemptRule::Forfeits`] a match on the last attempt loses.
#[instrument(skip(secret, config))]
pub fn classify(guess: u32, secret: Secret, attempts_used: u32, config: &GameConfig) -> Outcome {
    let exhausted = attempts_used >= config.max_attempts();
    let secret = secret.value();

    if guess == secret {
        match (exhausted, config.policy().final_attempt) {
            (true, FinalAttemptRule::Forfeits) => Outcome::Lost,
            _ => Outcome::Won,
        }
    } else if exhausted {
        Outcome::Lost
    } else if guess < secret {
        Outcome::TooLow
    } else {
        Outcome::TooHigh
    }
}

/// Tightest inclusive range still known to contain the secret.
///
/// Returns `None` until at least one guess has missed.
#[instrument(skip(history, secret))]
pub fn bracket(history: &[GuessRecord], secret: Secret, range_max: u32) -> Option<(u32, u32)> {
    let secret = secret.value();
    let misses = history.iter().map(|r| r.guess).filter(|g| *g != secret);

    let (lower, upper, any_miss) = misses.fold((0, range_max + 1, false), |(lo, hi, _), g| {
        if g < secret {
            (lo.max(g), hi, true)
        } else {
            (lo, hi.min(g), true)
        }
    });

    any_miss.then_some((lower + 1, upper - 1))
}
