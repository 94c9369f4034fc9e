//! First-class invariants for the guessing game.
//!
//! Invariants are logical properties that must hold while a game is in
//! progress. They are testable independently and document what the
//! engine guarantees.

#[cfg(kani)]
mod verification;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod attempt_budget;
pub mod history_consistent;
pub mod within_range;

pub use attempt_budget::AttemptBudgetInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use within_range::WithinRangeInvariant;

/// All guessing game invariants as a composable set.
pub type GuessingInvariants = (
    AttemptBudgetInvariant,
    HistoryConsistentInvariant,
    WithinRangeInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::guessing::{
        FixedSecret, GameConfig, GameInProgress, GameResult, GameSetup, Guess, GuessRecord, Outcome,
    };

    fn config() -> GameConfig {
        GameConfig::new(100, 5).unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let game = GameSetup::new(config()).start(&mut FixedSecret(42));
        assert!(GuessingInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_guesses() {
        let guesses = [Guess::new(50), Guess::new(25), Guess::new(40)];

        if let Ok(GameResult::InProgress(game)) =
            GameInProgress::replay(config(), &mut FixedSecret(42), &guesses)
        {
            assert!(GuessingInvariants::check_all(&game).is_ok());
        } else {
            panic!("Expected in-progress game");
        }
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let game = GameSetup::new(config()).start(&mut FixedSecret(42));

        if let Ok(GameResult::InProgress(mut game)) = game.make_guess(Guess::new(10)) {
            // Corrupt the log with a wrong direction and an out-of-range value
            game.history.push(GuessRecord::new(500, Outcome::TooLow));

            let violations = GuessingInvariants::check_all(&game).unwrap_err();
            assert!(violations.len() >= 2);
        } else {
            panic!("Expected in-progress game");
        }
    }

    #[test]
    fn test_two_invariants_as_set() {
        let game = GameSetup::new(config()).start(&mut FixedSecret(42));

        type TwoInvariants = (AttemptBudgetInvariant, WithinRangeInvariant);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
