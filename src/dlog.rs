//! Recovery of a small message `x` from the point `x * G`.
//!
//! Additive ElGamal only yields `M = x * G` after decryption, so the tally value has to be found
//! by searching `[0, max_message]`. Two strategies are available: a parallel brute-force scan
//! and baby-step giant-step, which needs `O(sqrt(max_message))` memory and time.

mod brute_force;
mod bsgs;

use crypto_bigint::U1024;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    curve::Point,
    error::Error,
    params::{curve_order, SchemeParams},
};

pub use brute_force::BruteForceOutcome;

/// Search bound large enough for every person on Earth casting a ballot worth up to 16.
pub const WORLD_SCALE_MAX_MESSAGE: u64 = 7_000_000_000 * 16;

/// The default number of brute-force workers.
pub const DEFAULT_WORKERS: usize = 10;

static_assertions::const_assert!(DEFAULT_WORKERS > 0);

/// The discrete log search algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscreteLogStrategy {
    /// Baby-step giant-step with a hash table of `ceil(sqrt(max_message)) + 1` entries.
    #[default]
    BabyStepGiantStep,
    /// A linear scan split between several worker threads.
    BruteForce,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

/// Parameters of the discrete log search.
///
/// `max_message` has no default: it must be sized for the election at hand,
/// see [`DiscreteLogConfig::for_election`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscreteLogConfig {
    /// The algorithm to use.
    #[serde(default)]
    pub strategy: DiscreteLogStrategy,
    /// The number of threads used by [`DiscreteLogStrategy::BruteForce`].
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// The largest message that can be recovered (inclusive).
    pub max_message: u64,
}

impl DiscreteLogConfig {
    /// Creates a configuration with the default strategy and worker count.
    pub fn new(max_message: u64) -> Self {
        Self {
            strategy: DiscreteLogStrategy::default(),
            workers: DEFAULT_WORKERS,
            max_message,
        }
    }

    /// Creates a configuration whose bound covers `voters` ballots of at most `max_ballot_value` each.
    pub fn for_election(voters: u64, max_ballot_value: u64) -> Result<Self, Error> {
        let max_message = voters.checked_mul(max_ballot_value).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "{voters} voters with ballots up to {max_ballot_value} overflow the message range"
            ))
        })?;
        Ok(Self::new(max_message))
    }

    /// Sets the search strategy.
    pub fn with_strategy(self, strategy: DiscreteLogStrategy) -> Self {
        Self { strategy, ..self }
    }

    /// Sets the number of brute-force workers.
    pub fn with_workers(self, workers: usize) -> Self {
        Self { workers, ..self }
    }

    /// Checks that the search is well-defined for the curve `P`.
    ///
    /// The bound must stay below a quarter of the group order, so that the searched multiples of `G`
    /// are all distinct and cannot wrap around.
    pub fn validate<P: SchemeParams>(&self) -> Result<(), Error> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("the number of workers must be positive".into()));
        }
        let bound = U1024::from_u128(u128::from(self.max_message) << 2);
        if bound >= curve_order::<P>() {
            return Err(Error::SearchSpaceTooLarge {
                max_message: self.max_message,
            });
        }
        Ok(())
    }
}

/// Finds `x` in `[0, max_message]` such that `target == x * G`.
pub fn solve<P: SchemeParams>(target: &Point<P>, config: &DiscreteLogConfig) -> Result<u64, Error> {
    config.validate::<P>()?;

    let value = match config.strategy {
        DiscreteLogStrategy::BabyStepGiantStep => bsgs::solve(target, config.max_message)?,
        DiscreteLogStrategy::BruteForce => brute_force::solve(target, config.max_message, config.workers)?.value,
    };

    info!("Decrypted message found: {value} ({:?})", config.strategy);
    Ok(value)
}

/// Runs the brute-force strategy and reports how much of the range was actually scanned.
pub fn solve_brute_force<P: SchemeParams>(
    target: &Point<P>,
    config: &DiscreteLogConfig,
) -> Result<BruteForceOutcome, Error> {
    config.validate::<P>()?;
    brute_force::solve(target, config.max_message, config.workers)
}

#[cfg(test)]
mod tests {
    use super::{solve, DiscreteLogConfig, DiscreteLogStrategy, WORLD_SCALE_MAX_MESSAGE};
    use crate::{
        curve::{Point, Scalar},
        error::Error,
        params::dev::TestParams,
    };

    #[cfg(feature = "k256")]
    use crate::params::k256::ProductionParams;

    fn target(x: u64) -> Point<TestParams> {
        Scalar::from(x).mul_by_generator()
    }

    #[test]
    fn recovers_small_messages() {
        for strategy in [DiscreteLogStrategy::BabyStepGiantStep, DiscreteLogStrategy::BruteForce] {
            let config = DiscreteLogConfig::new(10_000).with_strategy(strategy).with_workers(3);
            for x in [0, 1, 42, 1000, 9_999, 10_000] {
                assert_eq!(solve(&target(x), &config), Ok(x), "{strategy:?} failed for {x}");
            }
        }
    }

    #[test]
    fn out_of_range_is_unsolved() {
        let config = DiscreteLogConfig::new(1_000).with_strategy(DiscreteLogStrategy::BruteForce);
        assert_eq!(solve(&target(1_001), &config), Err(Error::DiscreteLogUnsolved));

        let config = DiscreteLogConfig::new(100);
        assert_eq!(solve(&target(5_000), &config), Err(Error::DiscreteLogUnsolved));
    }

    #[test]
    fn strategies_agree_past_the_bound() {
        let max_message = 100;
        let bsgs = DiscreteLogConfig::new(max_message);
        let brute_force = bsgs.with_strategy(DiscreteLogStrategy::BruteForce).with_workers(3);
        // 131 is the largest value the baby-step giant-step tables can reach for this bound.
        for x in (max_message - 1)..=131 {
            let expected = if x <= max_message {
                Ok(x)
            } else {
                Err(Error::DiscreteLogUnsolved)
            };
            assert_eq!(solve(&target(x), &bsgs), expected, "baby-step giant-step, x = {x}");
            assert_eq!(solve(&target(x), &brute_force), expected, "brute force, x = {x}");
        }
    }

    #[test]
    fn validation() {
        assert!(matches!(
            DiscreteLogConfig::new(10).with_workers(0).validate::<TestParams>(),
            Err(Error::InvalidConfig(_))
        ));

        // The test curve has an order of about 2^32.
        assert_eq!(
            DiscreteLogConfig::new(1 << 31).validate::<TestParams>(),
            Err(Error::SearchSpaceTooLarge { max_message: 1 << 31 })
        );
        assert!(DiscreteLogConfig::new(1 << 20).validate::<TestParams>().is_ok());
    }

    #[cfg(feature = "k256")]
    #[test]
    fn production_curve_accepts_any_bound() {
        assert!(DiscreteLogConfig::new(WORLD_SCALE_MAX_MESSAGE)
            .validate::<ProductionParams>()
            .is_ok());
        assert!(DiscreteLogConfig::new(u64::MAX).validate::<ProductionParams>().is_ok());
    }

    #[test]
    fn election_sizing() {
        let config = DiscreteLogConfig::for_election(1_000, 16).unwrap();
        assert_eq!(config.max_message, 16_000);
        assert!(matches!(
            DiscreteLogConfig::for_election(u64::MAX, 2),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn serde_defaults() {
        let config: DiscreteLogConfig = serde_json::from_str(r#"{"max_message": 500}"#).unwrap();
        assert_eq!(config, DiscreteLogConfig::new(500));

        let config: DiscreteLogConfig =
            serde_json::from_str(r#"{"strategy": "brute_force", "workers": 4, "max_message": 500}"#).unwrap();
        assert_eq!(config.strategy, DiscreteLogStrategy::BruteForce);
        assert_eq!(config.workers, 4);

        assert!(serde_json::from_str::<DiscreteLogConfig>(r#"{"workers": 4}"#).is_err());
    }
}
