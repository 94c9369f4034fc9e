//! Cross-game statistics and derived labels.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

use super::config::GameConfig;
use super::typestate::GameFinished;

/// Lifetime statistics across sessions.
///
/// Only ever grows, except through an explicit [`LifetimeStats::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct LifetimeStats {
    games_played: u32,
    games_won: u32,
    best_attempts: Option<u32>,
}

impl LifetimeStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished game.
    #[instrument(skip(self, game), fields(outcome = %game.outcome()))]
    pub fn record(&mut self, game: &GameFinished) {
        if game.is_won() {
            self.record_win(game.attempts_used());
        } else {
            self.record_loss();
        }
    }

    /// Records a win that took `attempts` guesses.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, attempts: u32) {
        self.games_played += 1;
        self.games_won += 1;
        self.best_attempts = Some(self.best_attempts.map_or(attempts, |best| best.min(attempts)));
        debug!(
            games_played = self.games_played,
            best_attempts = ?self.best_attempts,
            "Win recorded"
        );
    }

    /// Records a loss.
    #[instrument(skip(self))]
    pub fn record_loss(&mut self) {
        self.games_played += 1;
        debug!(games_played = self.games_played, "Loss recorded");
    }

    /// Games lost so far.
    pub fn games_lost(&self) -> u32 {
        self.games_played - self.games_won
    }

    /// Calculates win rate as a percentage (0.0–100.0).
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            (f64::from(self.games_won) / f64::from(self.games_played)) * 100.0
        }
    }

    /// Achievement tier earned by these statistics.
    pub fn tier(&self) -> AchievementTier {
        AchievementTier::for_stats(self)
    }

    /// Clears all counters.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(games_played = self.games_played, "Statistics reset");
        *self = Self::default();
    }
}

/// Statistics shared by every session of a process.
///
/// Cloning yields another handle to the same counters. Each update takes
/// the lock once, so concurrent resolutions cannot interleave their
/// three-field update.
#[derive(Debug, Clone, Default)]
pub struct SharedStats {
    inner: Arc<Mutex<LifetimeStats>>,
}

impl SharedStats {
    /// Creates empty shared statistics.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LifetimeStats> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a finished game.
    pub fn record(&self, game: &GameFinished) {
        self.lock().record(game);
    }

    /// Returns a copy of the current counters.
    pub fn snapshot(&self) -> LifetimeStats {
        *self.lock()
    }

    /// Clears all counters.
    pub fn reset(&self) {
        self.lock().reset();
    }
}

/// Tier earned from lifetime statistics.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum AchievementTier {
    /// No wins yet.
    Novice,
    /// At least one win.
    Apprentice,
    /// Five or more games with a win rate of at least 60%.
    Expert,
    /// Ten or more games with a win rate of at least 80%.
    Master,
}

impl AchievementTier {
    /// Derives the tier for the given statistics.
    pub fn for_stats(stats: &LifetimeStats) -> Self {
        let rate = stats.win_rate();
        match stats.games_played {
            _ if stats.games_won == 0 => AchievementTier::Novice,
            n if n >= 10 && rate >= 80.0 => AchievementTier::Master,
            n if n >= 5 && rate >= 60.0 => AchievementTier::Expert,
            _ => AchievementTier::Apprentice,
        }
    }
}

/// Difficulty label of a configuration.
///
/// Compares the attempt budget with the number of guesses a binary search
/// needs in the worst case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Difficulty {
    /// At least twice the attempts a perfect strategy needs.
    Easy,
    /// A perfect strategy always wins.
    Normal,
    /// At least half the attempts a perfect strategy needs.
    Hard,
    /// Winning mostly takes luck.
    Extreme,
}

impl Difficulty {
    /// Derives the label for a config.
    pub fn for_config(config: &GameConfig) -> Self {
        let optimal = optimal_attempts(config.range_max());
        let attempts = config.max_attempts();

        if attempts >= 2 * optimal {
            Difficulty::Easy
        } else if attempts >= optimal {
            Difficulty::Normal
        } else if attempts >= optimal.div_ceil(2) {
            Difficulty::Hard
        } else {
            Difficulty::Extreme
        }
    }
}

/// Worst-case guesses a binary search needs over `1..=range_max`.
pub fn optimal_attempts(range_max: u32) -> u32 {
    u32::BITS - range_max.leading_zeros()
}
