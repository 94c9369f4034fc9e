//! Number guessing: the player hunts a secret in `1..=range_max` with a
//! limited number of attempts.

mod action;
mod config;
mod contracts;
mod invariants;
mod rules;
mod secret;
mod session;
mod stats;
mod typestate;
mod types;

pub use action::{Guess, GuessError};
pub use config::{
    validate_config, ConfigError, FinalAttemptRule, GameConfig, GameSettings, GuessPolicy,
    MAX_ATTEMPTS_BOUNDS, RANGE_MAX_BOUNDS,
};
pub use contracts::{Contract, GuessContract, GuessInRange, LegalGuess, NotDuplicate};
pub use invariants::{
    AttemptBudgetInvariant, GuessingInvariants, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, WithinRangeInvariant,
};
pub use secret::{FixedSecret, RandomSecret, SecretSource};
pub use session::{Session, SessionSnapshot};
pub use stats::{optimal_attempts, AchievementTier, Difficulty, LifetimeStats, SharedStats};
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup};
pub use types::{GuessOutcome, GuessRecord, Outcome, Status};
