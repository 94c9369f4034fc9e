//! Tests for configuration validation and settings files.

use std::io::Write;

use strictly_guess::{
    validate_config, ConfigError, Difficulty, FinalAttemptRule, GameConfig, GameSettings,
    MAX_ATTEMPTS_BOUNDS, RANGE_MAX_BOUNDS,
};
use tempfile::NamedTempFile;

#[test]
fn test_bounds_are_enforced() {
    assert!(GameConfig::new(*RANGE_MAX_BOUNDS.start() as i64, 1).is_ok());
    assert!(GameConfig::new(*RANGE_MAX_BOUNDS.end() as i64, 1).is_ok());
    assert!(GameConfig::new(*RANGE_MAX_BOUNDS.end() as i64 + 1, 1).is_err());
    assert!(GameConfig::new(100, *MAX_ATTEMPTS_BOUNDS.end() as i64).is_ok());
    assert!(GameConfig::new(100, *MAX_ATTEMPTS_BOUNDS.end() as i64 + 1).is_err());
}

#[test]
fn test_validate_config_errors_name_the_field() {
    let err = validate_config("100", "zero").unwrap_err();
    assert!(err.to_string().contains("max_attempts"));

    let err = validate_config("1", "5").unwrap_err();
    assert_eq!(
        err,
        ConfigError::RangeOutOfBounds {
            value: 1,
            min: 2,
            max: 10_000
        }
    );
}

#[test]
fn test_overflowing_range_max_is_out_of_bounds() {
    let err = validate_config("100000000000000000000", "5").unwrap_err();
    assert_eq!(
        err,
        ConfigError::RangeOutOfBounds {
            value: i64::MAX,
            min: 2,
            max: 10_000
        }
    );
}

#[test]
fn test_settings_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(
        file,
        "range_max = 1000\nmax_attempts = 10\nreject_duplicates = true\nfinal_attempt = \"can_win\""
    )
    .expect("Failed to write settings");

    let settings = GameSettings::from_file(file.path()).expect("Settings load");
    let config = settings.validate().expect("Settings are valid");
    assert_eq!(config.range_max(), 1000);
    assert_eq!(config.max_attempts(), 10);
    assert!(config.policy().reject_duplicates);
    assert_eq!(config.policy().final_attempt, FinalAttemptRule::CanWin);
    assert_eq!(config.difficulty(), Difficulty::Normal);
}

#[test]
fn test_settings_missing_file() {
    let result = GameSettings::from_file("/definitely/not/here.toml");
    assert!(matches!(result, Err(ConfigError::Unreadable(_))));
}

#[test]
fn test_settings_malformed_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "range_max = \"lots\"").expect("Failed to write settings");

    assert!(matches!(
        GameSettings::from_file(file.path()),
        Err(ConfigError::Unreadable(_))
    ));
}
