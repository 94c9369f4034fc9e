//! Runtime session wrapper over the typestate phases.
//!
//! Callers that keep a game behind a handle cannot track its phase in the
//! type system. [`Session`] holds whichever phase the game is in and turns
//! a guess on a finished game into [`GuessError::SessionResolved`].

use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::action::{Guess, GuessError};
use super::config::GameConfig;
use super::stats::{Difficulty, LifetimeStats};
use super::typestate::{GameFinished, GameInProgress, GameResult};
use super::types::{GuessOutcome, GuessRecord, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Active(GameInProgress),
    Finished(GameFinished),
}

/// A live or resolved game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    phase: Phase,
}

impl From<GameInProgress> for Session {
    fn from(game: GameInProgress) -> Self {
        Self {
            phase: Phase::Active(game),
        }
    }
}

impl From<GameFinished> for Session {
    fn from(game: GameFinished) -> Self {
        Self {
            phase: Phase::Finished(game),
        }
    }
}

impl From<GameResult> for Session {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::InProgress(g) => g.into(),
            GameResult::Finished(g) => g.into(),
        }
    }
}

impl Session {
    /// Applies a guess.
    ///
    /// A rejected guess leaves the session exactly as it was.
    ///
    /// # Errors
    ///
    /// [`GuessError::SessionResolved`] if the game is over, otherwise the
    /// precondition errors of [`GameInProgress::make_guess`].
    #[instrument(skip(self), fields(status = %self.status()))]
    pub fn guess(&mut self, guess: Guess) -> Result<GuessOutcome, GuessError> {
        let Phase::Active(game) = &mut self.phase else {
            warn!("Guess submitted to a resolved session");
            return Err(GuessError::SessionResolved);
        };

        let terminal = game.apply(guess)?;
        let record = last_record(game.history())?;
        let attempts_used = game.attempts_used();
        let attempts_remaining = game.attempts_remaining();

        let outcome = match terminal {
            Some(outcome) => {
                let finished = game.take_finished(outcome);
                let secret = finished.secret_handle();
                self.phase = Phase::Finished(finished);
                GuessOutcome::resolved(record, attempts_used, attempts_remaining, secret)
            }
            None => GuessOutcome::pending(record, attempts_used, attempts_remaining),
        };
        debug!(outcome = %outcome.outcome(), "Guess applied");
        Ok(outcome)
    }

    /// Fails with [`GuessError::SessionResolved`] once the game is over.
    pub fn ensure_active(&self) -> Result<(), GuessError> {
        match self.phase {
            Phase::Active(_) => Ok(()),
            Phase::Finished(_) => Err(GuessError::SessionResolved),
        }
    }

    /// Current status.
    pub fn status(&self) -> Status {
        match &self.phase {
            Phase::Active(game) => game.status(),
            Phase::Finished(game) => game.status(),
        }
    }

    /// Returns true once the game is won or lost.
    pub fn is_resolved(&self) -> bool {
        self.status().is_resolved()
    }

    /// Returns the config.
    pub fn config(&self) -> &GameConfig {
        match &self.phase {
            Phase::Active(game) => game.config(),
            Phase::Finished(game) => game.config(),
        }
    }

    /// Accepted guesses so far.
    pub fn attempts_used(&self) -> u32 {
        match &self.phase {
            Phase::Active(game) => game.attempts_used(),
            Phase::Finished(game) => game.attempts_used(),
        }
    }

    /// Attempts left.
    pub fn attempts_remaining(&self) -> u32 {
        self.config().max_attempts() - self.attempts_used()
    }

    /// Returns the guess log.
    pub fn history(&self) -> &[GuessRecord] {
        match &self.phase {
            Phase::Active(game) => game.history(),
            Phase::Finished(game) => game.history(),
        }
    }

    /// Inclusive range still known to contain the secret.
    pub fn bracket(&self) -> Option<(u32, u32)> {
        match &self.phase {
            Phase::Active(game) => game.bracket(),
            Phase::Finished(game) => game.bracket(),
        }
    }

    /// The secret, once the game is resolved.
    pub fn revealed_secret(&self) -> Option<u32> {
        self.finished().map(GameFinished::secret)
    }

    /// The finished game, if resolved.
    pub fn finished(&self) -> Option<&GameFinished> {
        match &self.phase {
            Phase::Active(_) => None,
            Phase::Finished(game) => Some(game),
        }
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let config = self.config();
        SessionSnapshot {
            status: self.status(),
            range_max: config.range_max(),
            max_attempts: config.max_attempts(),
            attempts_used: self.attempts_used(),
            attempts_remaining: self.attempts_remaining(),
            history: self.history().to_vec(),
            bracket: self.bracket(),
            difficulty: config.difficulty(),
            secret: self.revealed_secret(),
            stats: None,
        }
    }
}

fn last_record(history: &[GuessRecord]) -> Result<GuessRecord, GuessError> {
    history.last().copied().ok_or_else(|| {
        GuessError::InvariantViolation("accepted guess missing from log".to_string())
    })
}

/// Serializable view of a session.
///
/// `secret` and `stats` are only filled in once the session is resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Current status.
    pub status: Status,
    /// Upper bound of the range.
    pub range_max: u32,
    /// Attempt budget.
    pub max_attempts: u32,
    /// Accepted guesses so far.
    pub attempts_used: u32,
    /// Attempts left.
    pub attempts_remaining: u32,
    /// Guess log in chronological order.
    pub history: Vec<GuessRecord>,
    /// Remaining candidate range, after the first miss.
    pub bracket: Option<(u32, u32)>,
    /// Difficulty of the config.
    pub difficulty: Difficulty,
    /// Revealed secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<u32>,
    /// Lifetime statistics when the snapshot was taken, which may include
    /// games resolved after this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<LifetimeStats>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::guessing::{FixedSecret, GameSetup, GuessPolicy, Outcome};

    fn session(range_max: i64, max_attempts: i64, secret: u32, policy: GuessPolicy) -> Session {
        let config = GameConfig::new(range_max, max_attempts)
            .unwrap()
            .with_policy(policy);
        GameSetup::new(config).start(&mut FixedSecret(secret)).into()
    }

    #[test]
    fn test_rejected_guess_leaves_session_untouched() {
        let mut s = session(100, 5, 42, GuessPolicy::default().rejecting_duplicates());
        s.guess(Guess::new(5)).unwrap();
        let before = s.clone();

        assert!(matches!(
            s.guess(Guess::new(0)),
            Err(GuessError::OutOfRange { .. })
        ));
        assert_eq!(
            s.guess(Guess::new(5)),
            Err(GuessError::DuplicateGuess(5))
        );
        assert_eq!(s, before);
        assert_eq!(s.attempts_used(), 1);
    }

    #[test]
    fn test_resolved_session_rejects_guesses() {
        let mut s = session(10, 1, 7, GuessPolicy::default());
        let outcome = s.guess(Guess::new(3)).unwrap();
        assert_eq!(outcome.outcome(), Outcome::Lost);
        assert_eq!(outcome.attempts_remaining(), 0);
        assert_eq!(outcome.secret(), Some(7));

        assert_eq!(s.guess(Guess::new(7)), Err(GuessError::SessionResolved));
        assert_eq!(s.ensure_active(), Err(GuessError::SessionResolved));
        assert_eq!(s.status(), Status::Lost);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_resolving_guess_keeps_full_log() {
        let mut s = session(100, 3, 42, GuessPolicy::default());
        s.guess(Guess::new(10)).unwrap();
        s.guess(Guess::new(90)).unwrap();
        let outcome = s.guess(Guess::new(42)).unwrap();

        assert_eq!(outcome.attempts_used(), 3);
        assert_eq!(outcome.attempts_remaining(), 0);
        let logged: Vec<_> = s.history().iter().map(|r| r.guess).collect();
        assert_eq!(logged, vec![10, 90, 42]);
        assert_eq!(s.finished().map(GameFinished::attempts_used), Some(3));
    }

    #[test]
    fn test_snapshot_hides_secret_until_resolved() {
        let mut s = session(100, 5, 42, GuessPolicy::default());
        s.guess(Guess::new(50)).unwrap();
        let snap = s.snapshot();
        assert_eq!(snap.status, Status::Active);
        assert_eq!(snap.secret, None);
        assert_eq!(snap.bracket, Some((1, 49)));

        s.guess(Guess::new(42)).unwrap();
        let snap = s.snapshot();
        assert_eq!(snap.status, Status::Won);
        assert_eq!(snap.secret, Some(42));
    }
}
