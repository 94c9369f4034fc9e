//! Formal verification of the guessing rules using the Kani model checker.
//!
//! These harnesses check the classification rules for ALL inputs within
//! the configured bounds, not just sampled ones.

#[cfg(kani)]
mod proofs {
    use crate::games::guessing::rules::classify;
    use crate::games::guessing::types::Secret;
    use crate::games::guessing::{GameConfig, Outcome};

    /// A matching guess never yields a direction, and wins unless the
    /// forfeit rule applies.
    #[kani::proof]
    fn verify_match_wins_under_default_policy() {
        let range_max: u32 = kani::any();
        let max_attempts: u32 = kani::any();
        let attempts_used: u32 = kani::any();
        let secret: u32 = kani::any();
        kani::assume((2..=10_000).contains(&range_max));
        kani::assume((1..=100).contains(&max_attempts));
        kani::assume((1..=max_attempts).contains(&attempts_used));
        kani::assume((1..=range_max).contains(&secret));

        let config = match GameConfig::new(range_max.into(), max_attempts.into()) {
            Ok(config) => config,
            Err(_) => unreachable!(),
        };

        assert_eq!(
            classify(secret, Secret::new(secret), attempts_used, &config),
            Outcome::Won
        );
    }

    /// Spending the last attempt on a miss always loses.
    #[kani::proof]
    fn verify_exhausted_miss_loses() {
        let max_attempts: u32 = kani::any();
        let secret: u32 = kani::any();
        let guess: u32 = kani::any();
        kani::assume((1..=100).contains(&max_attempts));
        kani::assume((1..=100).contains(&secret));
        kani::assume((1..=100).contains(&guess));
        kani::assume(guess != secret);

        let config = match GameConfig::new(100, max_attempts.into()) {
            Ok(config) => config,
            Err(_) => unreachable!(),
        };

        assert_eq!(
            classify(guess, Secret::new(secret), max_attempts, &config),
            Outcome::Lost
        );
    }
}
