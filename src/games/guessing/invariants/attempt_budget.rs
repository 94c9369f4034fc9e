//! Attempt budget invariant: an active game always has attempts left.

use super::super::GameInProgress;
use super::Invariant;

/// Invariant: `attempts_used < max_attempts` while the game is in progress.
///
/// The guess that spends the final attempt always resolves the game, so an
/// in-progress game with an exhausted budget means classification was skipped.
pub struct AttemptBudgetInvariant;

impl Invariant<GameInProgress> for AttemptBudgetInvariant {
    fn holds(game: &GameInProgress) -> bool {
        game.attempts_used < game.config.max_attempts()
    }

    fn description() -> &'static str {
        "In-progress game has attempts remaining"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::guessing::{FixedSecret, GameConfig, GameResult, GameSetup, Guess};

    #[test]
    fn test_new_game_holds() {
        let game = GameSetup::new(GameConfig::new(10, 1).unwrap()).start(&mut FixedSecret(3));
        assert!(AttemptBudgetInvariant::holds(&game));
    }

    #[test]
    fn test_holds_until_last_attempt() {
        let game = GameSetup::new(GameConfig::new(10, 2).unwrap()).start(&mut FixedSecret(3));

        if let Ok(GameResult::InProgress(game)) = game.make_guess(Guess::new(5)) {
            assert!(AttemptBudgetInvariant::holds(&game));
            assert_eq!(game.attempts_remaining(), 1);
        } else {
            panic!("Expected in-progress game");
        }
    }

    #[test]
    fn test_exhausted_budget_violates() {
        let mut game = GameSetup::new(GameConfig::new(10, 2).unwrap()).start(&mut FixedSecret(3));
        game.attempts_used = 2;
        assert!(!AttemptBudgetInvariant::holds(&game));
    }
}
