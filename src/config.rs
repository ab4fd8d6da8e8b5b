use serde::{Deserialize, Serialize};

use crate::{dlog::DiscreteLogConfig, error::Error, params::SchemeParams};

/// The default number of votes accepted in one batch.
pub const DEFAULT_VOTE_BATCH_SIZE: usize = 10;

static_assertions::const_assert!(DEFAULT_VOTE_BATCH_SIZE > 0);

fn default_vote_batch_size() -> usize {
    DEFAULT_VOTE_BATCH_SIZE
}

/// Settings of a tallying deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyConfig {
    /// How the final message is recovered from `M = message * G`.
    pub dlog: DiscreteLogConfig,
    /// The maximum number of votes in one batch.
    #[serde(default = "default_vote_batch_size")]
    pub vote_batch_size: usize,
}

impl TallyConfig {
    /// Creates a configuration with the default batch size and search parameters.
    pub fn new(max_message: u64) -> Self {
        Self {
            dlog: DiscreteLogConfig::new(max_message),
            vote_batch_size: DEFAULT_VOTE_BATCH_SIZE,
        }
    }

    /// Checks the configuration against the curve `P`.
    pub fn validate<P: SchemeParams>(&self) -> Result<(), Error> {
        if self.vote_batch_size == 0 {
            return Err(Error::InvalidConfig("the vote batch size must be positive".into()));
        }
        self.dlog.validate::<P>()
    }
}

#[cfg(test)]
mod tests {
    use super::{TallyConfig, DEFAULT_VOTE_BATCH_SIZE};
    use crate::{
        dlog::{DiscreteLogStrategy, DEFAULT_WORKERS},
        error::Error,
        params::dev::TestParams,
    };

    #[test]
    fn parse_minimal() {
        let config: TallyConfig = serde_json::from_str(r#"{"dlog": {"max_message": 1000}}"#).unwrap();
        assert_eq!(config, TallyConfig::new(1000));
        assert_eq!(config.vote_batch_size, DEFAULT_VOTE_BATCH_SIZE);
        assert_eq!(config.dlog.workers, DEFAULT_WORKERS);
        assert_eq!(config.dlog.strategy, DiscreteLogStrategy::BabyStepGiantStep);
        assert!(config.validate::<TestParams>().is_ok());
    }

    #[test]
    fn parse_full() {
        let json = r#"{
            "dlog": {"strategy": "brute_force", "workers": 2, "max_message": 64},
            "vote_batch_size": 3
        }"#;
        let config: TallyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.vote_batch_size, 3);
        assert_eq!(config.dlog.strategy, DiscreteLogStrategy::BruteForce);
        assert_eq!(config.dlog.workers, 2);

        let reparsed: TallyConfig = serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn rejects_empty_batches() {
        let config = TallyConfig {
            vote_batch_size: 0,
            ..TallyConfig::new(10)
        };
        assert!(matches!(config.validate::<TestParams>(), Err(Error::InvalidConfig(_))));
    }
}
