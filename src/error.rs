//! Crate-level error type.

use derive_more::{Display, From};

use crate::games::guessing::{ConfigError, GuessError};
use crate::session_manager::ManagerError;

/// Any error the engine reports.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum GameError {
    /// Invalid game configuration.
    #[display("Invalid config: {}", _0)]
    InvalidConfig(ConfigError),

    /// Rejected guess.
    #[display("{}", _0)]
    Guess(GuessError),

    /// Session manager failure.
    #[display("{}", _0)]
    Manager(ManagerError),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::InvalidConfig(e) => Some(e),
            GameError::Guess(e) => Some(e),
            GameError::Manager(e) => Some(e),
        }
    }
}
