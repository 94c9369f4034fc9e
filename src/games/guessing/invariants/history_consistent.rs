//! History consistency invariant: the log agrees with the counter and the secret.

use super::super::{GameInProgress, Outcome};
use super::Invariant;

/// Invariant: one log entry per accepted guess, each tagged with the
/// direction the secret actually lies in.
///
/// Terminal outcomes never appear in the log of an in-progress game.
pub struct HistoryConsistentInvariant;

impl Invariant<GameInProgress> for HistoryConsistentInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let secret = game.secret.value();

        game.history.len() == game.attempts_used as usize
            && game.history.iter().all(|record| match record.outcome {
                Outcome::TooLow => record.guess < secret,
                Outcome::TooHigh => record.guess > secret,
                Outcome::Won | Outcome::Lost => false,
            })
    }

    fn description() -> &'static str {
        "Guess log matches attempt count and secret direction"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::guessing::{
        FixedSecret, GameConfig, GameInProgress, GameResult, GameSetup, Guess, GuessRecord,
    };

    #[test]
    fn test_empty_game_holds() {
        let game = GameSetup::new(GameConfig::new(100, 5).unwrap()).start(&mut FixedSecret(42));
        assert!(HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_multiple_guesses_hold() {
        let guesses = [Guess::new(90), Guess::new(10), Guess::new(50), Guess::new(41)];

        if let Ok(GameResult::InProgress(game)) = GameInProgress::replay(
            GameConfig::new(100, 5).unwrap(),
            &mut FixedSecret(42),
            &guesses,
        ) {
            assert!(HistoryConsistentInvariant::holds(&game));
            assert_eq!(game.history().len(), 4);
        } else {
            panic!("Expected in-progress game");
        }
    }

    #[test]
    fn test_wrong_direction_violates() {
        let game = GameSetup::new(GameConfig::new(100, 5).unwrap()).start(&mut FixedSecret(42));

        if let Ok(GameResult::InProgress(mut game)) = game.make_guess(Guess::new(10)) {
            game.history[0] = GuessRecord::new(10, Outcome::TooHigh);
            assert!(!HistoryConsistentInvariant::holds(&game));
        } else {
            panic!("Expected in-progress game");
        }
    }

    #[test]
    fn test_missing_entry_violates() {
        let game = GameSetup::new(GameConfig::new(100, 5).unwrap()).start(&mut FixedSecret(42));

        if let Ok(GameResult::InProgress(mut game)) = game.make_guess(Guess::new(10)) {
            game.history.clear();
            assert!(!HistoryConsistentInvariant::holds(&game));
        } else {
            panic!("Expected in-progress game");
        }
    }
}
