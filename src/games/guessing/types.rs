//! Core domain types for the guessing game.

use derive_new::new;
use serde::{Deserialize, Serialize};

/// The hidden target number of a session.
///
/// Has no `Serialize` impl and a redacted `Debug`, so it cannot reach a
/// snapshot or a log line while the session is still active.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Secret(u32);

impl Secret {
    pub(crate) fn new(value: u32) -> Self {
        Self(value)
    }

    pub(crate) fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<hidden>)")
    }
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Configured, secret not drawn yet.
    Setup,
    /// Accepting guesses.
    Active,
    /// The secret was found.
    Won,
    /// The attempt budget ran out.
    Lost,
}

impl Status {
    /// Returns true for `Won` and `Lost`.
    pub fn is_resolved(self) -> bool {
        matches!(self, Status::Won | Status::Lost)
    }
}

/// Classification of a single accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The guess matched the secret.
    Won,
    /// The guess used the last attempt without winning.
    Lost,
    /// The guess is larger than the secret.
    TooHigh,
    /// The guess is smaller than the secret.
    TooLow,
}

impl Outcome {
    /// Returns true if this outcome ends the session.
    pub fn is_terminal(self) -> bool {
        matches!(self, Outcome::Won | Outcome::Lost)
    }

    /// Player-facing feedback for this outcome.
    pub fn feedback(self) -> &'static str {
        match self {
            Outcome::Won => "Correct! You found the secret number.",
            Outcome::Lost => "No attempts left.",
            Outcome::TooHigh => "Too high: the secret is smaller.",
            Outcome::TooLow => "Too low: the secret is larger.",
        }
    }

    /// Session status after a guess with this outcome.
    pub fn status(self) -> Status {
        match self {
            Outcome::Won => Status::Won,
            Outcome::Lost => Status::Lost,
            Outcome::TooHigh | Outcome::TooLow => Status::Active,
        }
    }
}

/// One entry of the guess log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct GuessRecord {
    /// The accepted guess.
    pub guess: u32,
    /// How it was classified.
    pub outcome: Outcome,
}

/// Result returned to the caller for every accepted guess.
///
/// The secret is only present once the outcome is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    guess: u32,
    outcome: Outcome,
    attempts_used: u32,
    attempts_remaining: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret: Option<u32>,
}

impl GuessOutcome {
    /// Outcome of a guess that leaves the session active.
    pub(crate) fn pending(
        record: GuessRecord,
        attempts_used: u32,
        attempts_remaining: u32,
    ) -> Self {
        debug_assert!(!record.outcome.is_terminal());
        Self {
            guess: record.guess,
            outcome: record.outcome,
            attempts_used,
            attempts_remaining,
            secret: None,
        }
    }

    /// Outcome of a guess that resolved the session, revealing the secret.
    pub(crate) fn resolved(
        record: GuessRecord,
        attempts_used: u32,
        attempts_remaining: u32,
        secret: Secret,
    ) -> Self {
        debug_assert!(record.outcome.is_terminal());
        Self {
            guess: record.guess,
            outcome: record.outcome,
            attempts_used,
            attempts_remaining,
            secret: Some(secret.value()),
        }
    }

    /// The accepted guess.
    pub fn guess(&self) -> u32 {
        self.guess
    }

    /// Classification tag.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Attempts consumed so far, including this one.
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Attempts left after this guess.
    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    /// The revealed secret, `None` while the session is active.
    pub fn secret(&self) -> Option<u32> {
        self.secret
    }

    /// Feedback message for the outcome.
    pub fn feedback(&self) -> &'static str {
        self.outcome.feedback()
    }
}

impl std::fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.secret {
            Some(secret) => write!(f, "{} The secret was {}.", self.feedback(), secret),
            None => write!(
                f,
                "{} {} attempt(s) left.",
                self.feedback(),
                self.attempts_remaining
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::new(42);
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("42"));
    }

    #[test]
    fn test_terminal_outcomes() {
        assert!(Outcome::Won.is_terminal());
        assert!(Outcome::Lost.is_terminal());
        assert!(!Outcome::TooHigh.is_terminal());
        assert!(!Outcome::TooLow.is_terminal());
    }

    #[test]
    fn test_outcome_status() {
        assert_eq!(Outcome::Won.status(), Status::Won);
        assert_eq!(Outcome::Lost.status(), Status::Lost);
        assert_eq!(Outcome::TooLow.status(), Status::Active);
        assert!(Status::Lost.is_resolved());
        assert!(!Status::Setup.is_resolved());
    }

    #[test]
    fn test_pending_outcome_display_hides_secret() {
        let outcome = GuessOutcome::pending(GuessRecord::new(50, Outcome::TooHigh), 1, 4);
        assert_eq!(outcome.secret(), None);
        assert_eq!(
            outcome.to_string(),
            "Too high: the secret is smaller. 4 attempt(s) left."
        );
    }

    #[test]
    fn test_resolved_outcome_reveals_secret() {
        let outcome =
            GuessOutcome::resolved(GuessRecord::new(3, Outcome::Lost), 1, 0, Secret::new(7));
        assert_eq!(outcome.secret(), Some(7));
        assert!(outcome.to_string().contains("The secret was 7"));
    }
}
