//! Per-player session management.
//!
//! Every player gets an isolated [`Session`]; all of them share one
//! [`SharedStats`].

use derive_more::{Display, From};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

use crate::engine::GuessingEngine;
use crate::games::guessing::{
    GameConfig, GuessError, GuessOutcome, LifetimeStats, RandomSecret, SecretSource, Session,
    SessionSnapshot, SharedStats,
};

/// Unique identifier for a player.
pub type PlayerId = String;

/// Error from the session manager.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum ManagerError {
    /// No session exists for the player.
    #[display("No session for player {}", _0)]
    #[from(skip)]
    UnknownPlayer(PlayerId),

    /// The guess was rejected.
    #[display("{}", _0)]
    Guess(GuessError),
}

impl std::error::Error for ManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManagerError::UnknownPlayer(_) => None,
            ManagerError::Guess(e) => Some(e),
        }
    }
}

/// Manages one session per player.
#[derive(Debug, Clone)]
pub struct SessionManager<S = RandomSecret> {
    engine: Arc<Mutex<GuessingEngine<S>>>,
    sessions: Arc<Mutex<HashMap<PlayerId, Session>>>,
    stats: SharedStats,
}

impl SessionManager<RandomSecret> {
    /// Creates a manager drawing secrets from OS entropy.
    #[instrument]
    pub fn new() -> Self {
        Self::with_source(RandomSecret::new())
    }
}

impl Default for SessionManager<RandomSecret> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: SecretSource> SessionManager<S> {
    /// Creates a manager with the given secret source.
    pub fn with_source(source: S) -> Self {
        let stats = SharedStats::new();
        info!("Creating session manager");
        Self {
            engine: Arc::new(Mutex::new(
                GuessingEngine::with_source(source).with_stats(stats.clone()),
            )),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            stats,
        }
    }

    /// Starts a fresh session for the player, replacing any previous one.
    #[instrument(skip(self))]
    pub fn start(&self, player: &str, config: GameConfig) -> SessionSnapshot {
        // The engine lock is released before the session map is locked.
        let session = lock(&self.engine).new_session(config);
        let snapshot = session.snapshot();

        if lock(&self.sessions)
            .insert(player.to_string(), session)
            .is_some()
        {
            debug!(player, "Replaced previous session");
        }
        info!(player, "Session started");
        snapshot
    }

    /// Submits a raw guess to the player's session.
    #[instrument(skip(self))]
    pub fn guess(&self, player: &str, raw: &str) -> Result<GuessOutcome, ManagerError> {
        let mut sessions = lock(&self.sessions);
        let session = sessions.get_mut(player).ok_or_else(|| {
            warn!(player, "Guess from player without a session");
            ManagerError::UnknownPlayer(player.to_string())
        })?;

        Ok(lock(&self.engine).submit_guess(session, raw)?)
    }

    /// Snapshot of the player's session.
    #[instrument(skip(self))]
    pub fn snapshot(&self, player: &str) -> Result<SessionSnapshot, ManagerError> {
        let sessions = lock(&self.sessions);
        let session = sessions
            .get(player)
            .ok_or_else(|| ManagerError::UnknownPlayer(player.to_string()))?;
        Ok(lock(&self.engine).snapshot(session))
    }

    /// Removes the player's session.
    #[instrument(skip(self))]
    pub fn end(&self, player: &str) -> Option<Session> {
        lock(&self.sessions).remove(player)
    }

    /// Players with a session.
    pub fn players(&self) -> Vec<PlayerId> {
        let mut players: Vec<_> = lock(&self.sessions).keys().cloned().collect();
        players.sort();
        players
    }

    /// Lifetime statistics across all players.
    pub fn stats(&self) -> LifetimeStats {
        self.stats.snapshot()
    }
}
