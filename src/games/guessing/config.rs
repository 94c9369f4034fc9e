//! Game configuration and validation.
//!
//! A [`GameConfig`] can only be obtained through validation, so every
//! session starts from sane bounds: a range of at least two numbers and
//! at least one attempt.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use super::stats::Difficulty;

/// Accepted values for `range_max` (the lower bound of the guessable range is always 1).
pub const RANGE_MAX_BOUNDS: RangeInclusive<u32> = 2..=10_000;

/// Accepted values for `max_attempts`.
pub const MAX_ATTEMPTS_BOUNDS: RangeInclusive<u32> = 1..=100;

/// What happens when the secret is guessed on the very last allowed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinalAttemptRule {
    /// A correct guess always wins, even on the last attempt.
    #[default]
    CanWin,
    /// The last attempt is consumed before the comparison; the game is lost.
    Forfeits,
}

/// Optional rule variants a game mode may enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GuessPolicy {
    /// Reject a guess already present in the session's log.
    pub reject_duplicates: bool,
    /// Behaviour of a correct guess on the final attempt.
    pub final_attempt: FinalAttemptRule,
}

impl GuessPolicy {
    /// Returns the policy with duplicate rejection turned on.
    pub fn rejecting_duplicates(mut self) -> Self {
        self.reject_duplicates = true;
        self
    }

    /// Returns the policy with the given final attempt rule.
    pub fn with_final_attempt(mut self, rule: FinalAttemptRule) -> Self {
        self.final_attempt = rule;
        self
    }
}

/// Validated, immutable parameters of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameConfig {
    range_max: u32,
    max_attempts: u32,
    policy: GuessPolicy,
}

impl GameConfig {
    /// Validates raw parameters and builds a config with the default policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RangeOutOfBounds`] or
    /// [`ConfigError::AttemptsOutOfBounds`] when a value falls outside
    /// [`RANGE_MAX_BOUNDS`] or [`MAX_ATTEMPTS_BOUNDS`].
    #[instrument]
    pub fn new(range_max: i64, max_attempts: i64) -> Result<Self, ConfigError> {
        let range_max = within(range_max, &RANGE_MAX_BOUNDS).ok_or_else(|| {
            warn!(range_max, "range_max rejected");
            ConfigError::RangeOutOfBounds {
                value: range_max,
                min: *RANGE_MAX_BOUNDS.start(),
                max: *RANGE_MAX_BOUNDS.end(),
            }
        })?;

        let max_attempts = within(max_attempts, &MAX_ATTEMPTS_BOUNDS).ok_or_else(|| {
            warn!(max_attempts, "max_attempts rejected");
            ConfigError::AttemptsOutOfBounds {
                value: max_attempts,
                min: *MAX_ATTEMPTS_BOUNDS.start(),
                max: *MAX_ATTEMPTS_BOUNDS.end(),
            }
        })?;

        debug!(range_max, max_attempts, "Config validated");
        Ok(Self {
            range_max,
            max_attempts,
            policy: GuessPolicy::default(),
        })
    }

    /// Returns the config with the given policy.
    pub fn with_policy(mut self, policy: GuessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Inclusive upper bound of the guessable range.
    pub fn range_max(&self) -> u32 {
        self.range_max
    }

    /// Number of guesses a session may accept.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Active rule variants.
    pub fn policy(&self) -> GuessPolicy {
        self.policy
    }

    /// Difficulty label derived from the range and attempt budget.
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::for_config(self)
    }
}

fn within(value: i64, bounds: &RangeInclusive<u32>) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| bounds.contains(v))
}

/// Validates parameters arriving from an untyped source such as a text field.
///
/// # Errors
///
/// Returns [`ConfigError::NotAnInteger`] when an input does not parse,
/// otherwise the bound errors of [`GameConfig::new`].
#[instrument]
pub fn validate_config(range_max: &str, max_attempts: &str) -> Result<GameConfig, ConfigError> {
    let range_max = parse_field("range_max", range_max)?;
    let max_attempts = parse_field("max_attempts", max_attempts)?;
    GameConfig::new(range_max, max_attempts)
}

/// Integers too large for an `i64` saturate, so they reach the bound check.
fn parse_field(field: &'static str, input: &str) -> Result<i64, ConfigError> {
    match input.trim().parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => {
                warn!(field, input, "Config value is not an integer");
                Err(ConfigError::NotAnInteger {
                    field,
                    input: input.to_string(),
                })
            }
        },
    }
}

/// Game settings as written in a TOML file, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Upper bound of the guessable range.
    #[serde(default = "default_range_max")]
    pub range_max: i64,

    /// Attempt budget per game.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i64,

    /// Reject repeated guesses instead of spending an attempt on them.
    #[serde(default)]
    pub reject_duplicates: bool,

    /// Behaviour of a correct guess on the final attempt.
    #[serde(default)]
    pub final_attempt: FinalAttemptRule,
}

fn default_range_max() -> i64 {
    100
}

fn default_max_attempts() -> i64 {
    5
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            range_max: default_range_max(),
            max_attempts: default_max_attempts(),
            reject_duplicates: false,
            final_attempt: FinalAttemptRule::default(),
        }
    }
}

impl GameSettings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Unreadable(format!("Failed to read settings file: {}", e)))?;
        let settings = Self::from_toml_str(&content)?;
        info!(
            range_max = settings.range_max,
            max_attempts = settings.max_attempts,
            "Settings loaded"
        );
        Ok(settings)
    }

    /// Parses settings from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::Unreadable(format!("Failed to parse settings: {}", e)))
    }

    /// Validates the settings into a [`GameConfig`].
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<GameConfig, ConfigError> {
        let policy = GuessPolicy {
            reject_duplicates: self.reject_duplicates,
            final_attempt: self.final_attempt,
        };
        Ok(GameConfig::new(self.range_max, self.max_attempts)?.with_policy(policy))
    }
}

/// Invalid game configuration. The caller should re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigError {
    /// `range_max` is outside the accepted bounds.
    #[display("range_max must be between {min} and {max}, got {value}")]
    RangeOutOfBounds {
        /// Rejected value.
        value: i64,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// `max_attempts` is outside the accepted bounds.
    #[display("max_attempts must be between {min} and {max}, got {value}")]
    AttemptsOutOfBounds {
        /// Rejected value.
        value: i64,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// An input could not be parsed as an integer.
    #[display("{field} must be a whole number, got {input:?}")]
    NotAnInteger {
        /// Name of the offending parameter.
        field: &'static str,
        /// Raw input as received.
        input: String,
    },

    /// A settings file could not be read or parsed.
    #[display("{_0}")]
    Unreadable(String),
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_bounds() {
        assert!(GameConfig::new(2, 1).is_ok());
        assert!(GameConfig::new(10_000, 100).is_ok());
    }

    #[test]
    fn test_rejects_degenerate_range() {
        assert!(matches!(
            GameConfig::new(1, 5),
            Err(ConfigError::RangeOutOfBounds { value: 1, .. })
        ));
        assert!(matches!(
            GameConfig::new(10_001, 5),
            Err(ConfigError::RangeOutOfBounds { .. })
        ));
        assert!(matches!(
            GameConfig::new(-3, 5),
            Err(ConfigError::RangeOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        assert!(matches!(
            GameConfig::new(100, 0),
            Err(ConfigError::AttemptsOutOfBounds { value: 0, .. })
        ));
        assert!(matches!(
            GameConfig::new(100, 101),
            Err(ConfigError::AttemptsOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_validate_config_parses_text() {
        let config = validate_config(" 50 ", "7").expect("valid config");
        assert_eq!(config.range_max(), 50);
        assert_eq!(config.max_attempts(), 7);
        assert_eq!(config.policy(), GuessPolicy::default());
    }

    #[test]
    fn test_validate_config_rejects_non_integer() {
        let err = validate_config("ten", "5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotAnInteger { field: "range_max", .. }
        ));
        assert!(err.to_string().contains("ten"));

        assert!(matches!(
            validate_config("10", "2.5"),
            Err(ConfigError::NotAnInteger { field: "max_attempts", .. })
        ));
    }

    #[test]
    fn test_validate_config_overflow_is_out_of_bounds() {
        assert!(matches!(
            validate_config("100000000000000000000", "5"),
            Err(ConfigError::RangeOutOfBounds { value: i64::MAX, .. })
        ));
        assert!(matches!(
            validate_config("-100000000000000000000", "5"),
            Err(ConfigError::RangeOutOfBounds { value: i64::MIN, .. })
        ));
        assert!(matches!(
            validate_config("100", "100000000000000000000"),
            Err(ConfigError::AttemptsOutOfBounds { value: i64::MAX, .. })
        ));
    }

    #[test]
    fn test_settings_defaults_when_fields_missing() {
        let settings = GameSettings::from_toml_str("").expect("empty document parses");
        assert_eq!(settings, GameSettings::default());

        let config = settings.validate().expect("defaults are valid");
        assert_eq!(config.range_max(), 100);
        assert_eq!(config.max_attempts(), 5);
    }

    #[test]
    fn test_settings_policy_fields() {
        let settings = GameSettings::from_toml_str(
            "range_max = 20\nreject_duplicates = true\nfinal_attempt = \"forfeits\"\n",
        )
        .expect("parses");
        let config = settings.validate().expect("valid");
        assert!(config.policy().reject_duplicates);
        assert_eq!(config.policy().final_attempt, FinalAttemptRule::Forfeits);
    }

    #[test]
    fn test_settings_out_of_bounds_fail_validation() {
        let settings = GameSettings::from_toml_str("max_attempts = 0").expect("parses");
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::AttemptsOutOfBounds { .. })
        ));
    }
}
