//! Range invariant: the secret and every logged guess lie in `1..=range_max`.

use super::super::GameInProgress;
use super::Invariant;

/// Invariant: all numbers the game holds are inside the configured range.
pub struct WithinRangeInvariant;

impl Invariant<GameInProgress> for WithinRangeInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let range = 1..=game.config.range_max();

        range.contains(&game.secret.value())
            && game.history.iter().all(|record| range.contains(&record.guess))
    }

    fn description() -> &'static str {
        "Secret and guesses lie within 1..=range_max"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::guessing::types::Secret;
    use crate::games::guessing::{
        FixedSecret, GameConfig, GameResult, GameSetup, Guess, GuessRecord, Outcome,
    };

    #[test]
    fn test_edges_hold() {
        let game = GameSetup::new(GameConfig::new(10, 5).unwrap()).start(&mut FixedSecret(5));

        if let Ok(GameResult::InProgress(game)) = game.make_guess(Guess::new(1)) {
            if let Ok(GameResult::InProgress(game)) = game.make_guess(Guess::new(10)) {
                assert!(WithinRangeInvariant::holds(&game));
                return;
            }
        }
        panic!("Expected in-progress game");
    }

    #[test]
    fn test_corrupted_secret_violates() {
        let mut game = GameSetup::new(GameConfig::new(10, 5).unwrap()).start(&mut FixedSecret(5));
        game.secret = Secret::new(0);
        assert!(!WithinRangeInvariant::holds(&game));
    }

    #[test]
    fn test_corrupted_guess_violates() {
        let mut game = GameSetup::new(GameConfig::new(10, 5).unwrap()).start(&mut FixedSecret(5));
        game.history.push(GuessRecord::new(11, Outcome::TooHigh));
        game.attempts_used = 1;
        assert!(!WithinRangeInvariant::holds(&game));
    }
}
