//! Guess actions and the errors that reject them.
//!
//! A [`Guess`] is the player's intent. It is checked against the session
//! by the contracts before anything is mutated, so a rejected guess never
//! costs an attempt.

use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use tracing::{debug, instrument, warn};

/// A guess submitted by the player, not yet checked against the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guess {
    value: i64,
}

impl Guess {
    /// Creates a guess from an integer.
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    /// Parses raw player input.
    ///
    /// Integers too large for an `i64` saturate to `i64::MAX` or `i64::MIN`,
    /// so they fail the range check like any other out-of-range guess.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::InvalidGuess`] if the input is not an integer.
    #[instrument]
    pub fn parse(raw: &str) -> Result<Self, GuessError> {
        match raw.trim().parse::<i64>() {
            Ok(value) => Ok(Self::new(value)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => {
                    debug!(raw, "Guess overflows i64");
                    Ok(Self::new(i64::MAX))
                }
                IntErrorKind::NegOverflow => {
                    debug!(raw, "Guess overflows i64");
                    Ok(Self::new(i64::MIN))
                }
                _ => {
                    warn!(raw, "Guess is not an integer");
                    Err(GuessError::InvalidGuess(raw.to_string()))
                }
            },
        }
    }

    /// The submitted value.
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl From<u32> for Guess {
    fn from(value: u32) -> Self {
        Self::new(i64::from(value))
    }
}

impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Error rejecting a guess.
///
/// Input errors leave the session untouched: no attempt is consumed and
/// the guess log is not extended.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GuessError {
    /// The input is not an integer.
    #[display("{:?} is not a whole number", _0)]
    InvalidGuess(String),

    /// The guess lies outside `1..=max`.
    #[display("{} is out of range: pick a number between 1 and {}", guess, max)]
    OutOfRange {
        /// Rejected value.
        guess: i64,
        /// Upper bound of the range.
        max: u32,
    },

    /// The guess was already made in this session.
    #[display("{} was already guessed", _0)]
    DuplicateGuess(u32),

    /// The session has already been won or lost.
    #[display("Session is already resolved; start a new one")]
    SessionResolved,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl GuessError {
    /// Returns true for errors caused by player input, as opposed to caller misuse.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GuessError::InvalidGuess(_)
                | GuessError::OutOfRange { .. }
                | GuessError::DuplicateGuess(_)
        )
    }
}

impl std::error::Error for GuessError {}
