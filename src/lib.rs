//! Strictly Guess - a type-safe number guessing game engine
//!
//! The engine picks a secret in `1..=range_max`; the player guesses until
//! they find it or run out of attempts.
//!
//! # Architecture
//!
//! - **Config**: validated game parameters and rule variants
//! - **Games**: typestate game phases with contracts and invariants
//! - **Engine**: the operations a presentation layer calls
//! - **Session manager**: isolated per-player sessions with shared statistics
//!
//! # Example
//!
//! ```
//! use strictly_guess::{validate_config, FixedSecret, GuessingEngine, Outcome, SharedStats};
//!
//! # fn example() -> Result<(), strictly_guess::GameError> {
//! let stats = SharedStats::new();
//! let mut engine = GuessingEngine::with_source(FixedSecret(42)).with_stats(stats.clone());
//!
//! let config = validate_config("100", "5")?;
//! let mut session = engine.new_session(config);
//!
//! assert_eq!(engine.submit_guess(&mut session, "50")?.outcome(), Outcome::TooHigh);
//! let outcome = engine.submit_guess(&mut session, "42")?;
//! assert_eq!(outcome.outcome(), Outcome::Won);
//! assert_eq!(outcome.secret(), Some(42));
//! assert_eq!(*stats.snapshot().best_attempts(), Some(2));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod engine;
mod error;
mod games;
mod session_manager;

// Crate-level exports - Engine
pub use engine::GuessingEngine;

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Session management
pub use session_manager::{ManagerError, PlayerId, SessionManager};

// Crate-level exports - Game types (guessing)
pub use games::guessing::{
    optimal_attempts, validate_config, AchievementTier, AttemptBudgetInvariant, ConfigError,
    Contract, Difficulty, FinalAttemptRule, FixedSecret, GameConfig, GameFinished,
    GameInProgress, GameResult, GameSettings, GameSetup, Guess, GuessContract, GuessError,
    GuessInRange, GuessOutcome, GuessPolicy, GuessRecord, GuessingInvariants,
    HistoryConsistentInvariant, Invariant, InvariantSet, InvariantViolation, LegalGuess,
    LifetimeStats, NotDuplicate, Outcome, RandomSecret, SecretSource, Session, SessionSnapshot,
    SharedStats, Status, WithinRangeInvariant, MAX_ATTEMPTS_BOUNDS, RANGE_MAX_BOUNDS,
};
