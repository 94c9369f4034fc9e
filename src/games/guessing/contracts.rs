//! Contract-based validation for the guessing game.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Guess, GuessError};
use super::invariants::{GuessingInvariants, InvariantSet};
use super::typestate::GameInProgress;
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GuessError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GuessError>;
}

// ─────────────────────────────────────────────────────────────
//  Guess Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the guess lies in `1..=range_max`.
pub struct GuessInRange;

impl GuessInRange {
    /// Returns the guess as an in-range value.
    #[instrument(skip(game))]
    pub fn check(guess: &Guess, game: &GameInProgress) -> Result<u32, GuessError> {
        let max = game.config().range_max();
        u32::try_from(guess.value())
            .ok()
            .filter(|v| (1..=max).contains(v))
            .ok_or(GuessError::OutOfRange {
                guess: guess.value(),
                max,
            })
    }
}

/// Precondition: the value was not guessed before, when the policy asks for it.
pub struct NotDuplicate;

impl NotDuplicate {
    /// Passes unless duplicate rejection is on and `value` is already logged.
    #[instrument(skip(game))]
    pub fn check(value: u32, game: &GameInProgress) -> Result<(), GuessError> {
        if !game.config().policy().reject_duplicates {
            return Ok(());
        }
        if game.history().iter().any(|r| r.guess == value) {
            debug!(value, "Duplicate guess rejected");
            Err(GuessError::DuplicateGuess(value))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: a guess is legal if it is in range and, under
/// duplicate rejection, new.
pub struct LegalGuess;

impl LegalGuess {
    /// Validates all preconditions, returning the accepted value.
    #[instrument(skip(game))]
    pub fn check(guess: &Guess, game: &GameInProgress) -> Result<u32, GuessError> {
        let value = GuessInRange::check(guess, game)?;
        NotDuplicate::check(value, game)?;
        Ok(value)
    }
}

// ─────────────────────────────────────────────────────────────
//  Guess Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for guess actions.
///
/// Preconditions:
/// - Guess is within range
/// - Guess is new (duplicate rejection only)
///
/// Postconditions:
/// - Exactly one attempt was consumed
/// - The log only grew by appending
/// - All game invariants still hold
pub struct GuessContract;

impl Contract<GameInProgress, Guess> for GuessContract {
    fn pre(game: &GameInProgress, action: &Guess) -> Result<(), GuessError> {
        LegalGuess::check(action, game).map(|_| ())
    }

    fn post(before: &GameInProgress, after: &GameInProgress) -> Result<(), GuessError> {
        if after.attempts_used() != before.attempts_used() + 1 {
            return Err(GuessError::InvariantViolation(format!(
                "Postcondition failed: attempts went from {} to {}",
                before.attempts_used(),
                after.attempts_used()
            )));
        }

        if after.history().len() != before.history().len() + 1
            || !after.history().starts_with(before.history())
        {
            return Err(GuessError::InvariantViolation(
                "Postcondition failed: guess log was rewritten".to_string(),
            ));
        }

        GuessingInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            GuessError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Asserts that all game invariants hold (panic on violation in debug builds).
#[instrument(skip(game))]
pub fn assert_invariants(game: &GameInProgress) {
    debug_assert!(
        GuessingInvariants::check_all(game).is_ok(),
        "Game invariants violated"
    );
}
