//! Phase-specific typestate structs for the guessing game.
//!
//! Each phase is its own type. A `GameFinished` ALWAYS has a terminal
//! outcome and a revealed secret; only `GameInProgress` accepts guesses.

use super::action::{Guess, GuessError};
use super::config::GameConfig;
use super::contracts::{assert_invariants, Contract, GuessContract, LegalGuess};
use super::rules;
use super::secret::SecretSource;
use super::types::{GuessRecord, Outcome, Secret, Status};
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase: configured, no secret yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    config: GameConfig,
}

impl GameSetup {
    /// Creates a new game in setup phase.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Returns the config.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Always [`Status::Setup`].
    pub fn status(&self) -> Status {
        Status::Setup
    }

    /// Draws the secret and starts the game (consumes setup, returns in-progress).
    ///
    /// # Panics
    ///
    /// Panics if the source returns a value outside `1..=range_max`.
    #[instrument(skip(self, source), fields(range_max = self.config.range_max()))]
    pub fn start<S: SecretSource + ?Sized>(self, source: &mut S) -> GameInProgress {
        let range_max = self.config.range_max();
        let drawn = source.draw(range_max);
        assert!(
            (1..=range_max).contains(&drawn),
            "secret source returned a value outside 1..={}",
            range_max
        );

        info!(max_attempts = self.config.max_attempts(), "Game started");
        GameInProgress {
            config: self.config,
            secret: Secret::new(drawn),
            attempts_used: 0,
            history: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress: accepts guesses.
///
/// Invariants enforced by type and contract:
/// - attempts_used < max_attempts
/// - history has exactly one entry per accepted guess
/// - no outcome yet (outcome is in GameFinished)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInProgress {
    pub(super) config: GameConfig,
    pub(super) secret: Secret,
    pub(super) attempts_used: u32,
    pub(super) history: Vec<GuessRecord>,
}

impl GameInProgress {
    /// Makes a guess, consuming self and transitioning to the next state.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (LegalGuess)
    /// - Postconditions checked in debug builds only
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::OutOfRange`] or [`GuessError::DuplicateGuess`]
    /// if a precondition fails.
    #[instrument(skip(self), fields(attempts_used = self.attempts_used))]
    pub fn make_guess(mut self, guess: Guess) -> Result<GameResult, GuessError> {
        match self.apply(guess)? {
            Some(outcome) => Ok(GameResult::Finished(self.take_finished(outcome))),
            None => Ok(GameResult::InProgress(self)),
        }
    }

    /// Applies a guess in place.
    ///
    /// Returns the terminal outcome when the guess resolves the game; the
    /// caller must then move the game into [`GameFinished`] with
    /// [`GameInProgress::take_finished`]. On error the game is unchanged.
    pub(super) fn apply(&mut self, guess: Guess) -> Result<Option<Outcome>, GuessError> {
        // Precondition
        let value = LegalGuess::check(&guess, self)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.attempts_used += 1;
        assert!(
            self.attempts_used <= self.config.max_attempts(),
            "attempt budget exceeded: {} > {}",
            self.attempts_used,
            self.config.max_attempts()
        );

        let outcome = rules::classify(value, self.secret, self.attempts_used, &self.config);
        self.history.push(GuessRecord::new(value, outcome));
        debug!(guess = value, %outcome, "Guess classified");

        if outcome.is_terminal() {
            info!(%outcome, attempts_used = self.attempts_used, "Game resolved");
            return Ok(Some(outcome));
        }

        // Postcondition: Verify contract in debug builds
        #[cfg(debug_assertions)]
        if let Err(e) = GuessContract::post(&before, self) {
            *self = before;
            return Err(e);
        }

        assert_invariants(self);

        Ok(None)
    }

    /// Moves the game into the finished phase, leaving `self` with an empty log.
    pub(super) fn take_finished(&mut self, outcome: Outcome) -> GameFinished {
        debug_assert!(outcome.is_terminal());
        GameFinished {
            config: self.config,
            secret: self.secret,
            attempts_used: self.attempts_used,
            history: std::mem::take(&mut self.history),
            outcome,
        }
    }

    /// Returns the config.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Always [`Status::Active`].
    pub fn status(&self) -> Status {
        Status::Active
    }

    /// Accepted guesses so far.
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Guesses left before the game is lost.
    pub fn attempts_remaining(&self) -> u32 {
        self.config.max_attempts() - self.attempts_used
    }

    /// Returns the guess log in chronological order.
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// Outcome of the most recent guess.
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.history.last().map(|r| r.outcome)
    }

    /// Inclusive range still known to contain the secret.
    pub fn bracket(&self) -> Option<(u32, u32)> {
        rules::bracket(&self.history, self.secret, self.config.range_max())
    }

    /// Replays guesses from a fresh setup.
    #[instrument(skip(source))]
    pub fn replay<S: SecretSource + ?Sized>(
        config: GameConfig,
        source: &mut S,
        guesses: &[Guess],
    ) -> Result<GameResult, GuessError> {
        let mut game = GameSetup::new(config).start(source);

        for guess in guesses {
            match game.make_guess(*guess)? {
                GameResult::InProgress(g) => game = g,
                GameResult::Finished(g) => return Ok(GameResult::Finished(g)),
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished: outcome determined, secret revealed.
///
/// The outcome is ALWAYS `Won` or `Lost` (not Option).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFinished {
    config: GameConfig,
    secret: Secret,
    attempts_used: u32,
    history: Vec<GuessRecord>,
    outcome: Outcome,
}

impl GameFinished {
    /// Returns the terminal outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns true if the secret was found.
    pub fn is_won(&self) -> bool {
        self.outcome == Outcome::Won
    }

    /// The revealed secret.
    pub fn secret(&self) -> u32 {
        self.secret.value()
    }

    pub(crate) fn secret_handle(&self) -> Secret {
        self.secret
    }

    /// Returns the config.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Status matching the outcome.
    pub fn status(&self) -> Status {
        self.outcome.status()
    }

    /// Attempts consumed.
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Attempts left unused (non-zero only after a win).
    pub fn attempts_remaining(&self) -> u32 {
        self.config.max_attempts() - self.attempts_used
    }

    /// Returns the guess log.
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// Final known range around the secret.
    pub fn bracket(&self) -> Option<(u32, u32)> {
        rules::bracket(&self.history, self.secret, self.config.range_max())
    }

    /// Restarts with the same config (consumes finished, returns setup).
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::new(self.config)
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
