//! The game engine: the four operations a presentation layer calls.
//!
//! ```
//! use strictly_guess::{FixedSecret, GameConfig, GuessingEngine, Outcome};
//!
//! let mut engine = GuessingEngine::with_source(FixedSecret(42));
//! let mut session = engine.new_session(GameConfig::new(100, 5)?);
//!
//! let outcome = engine.submit_guess(&mut session, "50")?;
//! assert_eq!(outcome.outcome(), Outcome::TooHigh);
//! assert_eq!(outcome.secret(), None);
//! # Ok::<(), strictly_guess::GameError>(())
//! ```

use tracing::{debug, info, instrument};

use crate::games::guessing::{
    self, ConfigError, GameConfig, GameSetup, Guess, GuessError, GuessOutcome, RandomSecret,
    SecretSource, Session, SessionSnapshot, SharedStats,
};

/// Creates sessions and applies guesses, recording resolutions into the
/// injected statistics, if any.
#[derive(Debug, Clone)]
pub struct GuessingEngine<S = RandomSecret> {
    source: S,
    stats: Option<SharedStats>,
}

impl GuessingEngine<RandomSecret> {
    /// Creates an engine drawing secrets from OS entropy, without statistics.
    #[instrument]
    pub fn new() -> Self {
        Self::with_source(RandomSecret::new())
    }
}

impl Default for GuessingEngine<RandomSecret> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SecretSource> GuessingEngine<S> {
    /// Creates an engine with the given secret source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            stats: None,
        }
    }

    /// Attaches statistics that every resolved session updates.
    pub fn with_stats(mut self, stats: SharedStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// The attached statistics.
    pub fn stats(&self) -> Option<&SharedStats> {
        self.stats.as_ref()
    }

    /// Validates game parameters from an untyped source.
    ///
    /// # Errors
    ///
    /// See [`guessing::validate_config`].
    pub fn validate_config(
        &self,
        range_max: &str,
        max_attempts: &str,
    ) -> Result<GameConfig, ConfigError> {
        guessing::validate_config(range_max, max_attempts)
    }

    /// Starts a new session. Consumes one draw from the secret source.
    #[instrument(skip(self))]
    pub fn new_session(&mut self, config: GameConfig) -> Session {
        let game = GameSetup::new(config).start(&mut self.source);
        info!(difficulty = %config.difficulty(), "New session");
        game.into()
    }

    /// Parses and applies a raw guess.
    ///
    /// # Errors
    ///
    /// [`GuessError::SessionResolved`] if the session is over (checked
    /// first), [`GuessError::InvalidGuess`] if `raw` is not an integer, or
    /// the range and duplicate errors of [`Session::guess`]. Errors never
    /// consume an attempt.
    #[instrument(skip(self, session))]
    pub fn submit_guess(
        &self,
        session: &mut Session,
        raw: &str,
    ) -> Result<GuessOutcome, GuessError> {
        session.ensure_active()?;
        let guess = Guess::parse(raw)?;
        self.submit(session, guess)
    }

    /// Applies an already-parsed guess.
    #[instrument(skip(self, session))]
    pub fn submit(&self, session: &mut Session, guess: Guess) -> Result<GuessOutcome, GuessError> {
        let outcome = session.guess(guess)?;

        if let (Some(stats), Some(finished)) = (&self.stats, session.finished()) {
            stats.record(finished);
            debug!(stats = ?stats.snapshot(), "Statistics updated");
        }

        Ok(outcome)
    }

    /// Read-only view of a session, with statistics once it is resolved.
    pub fn snapshot(&self, session: &Session) -> SessionSnapshot {
        let mut snapshot = session.snapshot();
        if session.is_resolved() {
            snapshot.stats = self.stats.as_ref().map(SharedStats::snapshot);
        }
        snapshot
    }
}
