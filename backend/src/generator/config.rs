//! Generator configuration

use serde::{Deserialize, Serialize};

use crate::error::{matrix_side, GeneratorError};
use crate::sampler::SaidmanParams;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 34252;

/// Default rejection-sampling budget per requested pair.
pub const DEFAULT_MAX_ATTEMPTS_PER_PAIR: usize = 10_000;

/// What CPRA to record for altruist slots.
///
/// Altruists have no patient, so any value here is a placeholder: altruist
/// rows are overridden in `edges` and zeroed in `edge_weights`, so the
/// choice never changes a matrix cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltruistCpraPolicy {
    /// Record 0.0.
    #[default]
    Zero,

    /// Repeat the CPRA of the last accepted pair (0.0 without pairs).
    /// Matches pools exported by tooling that carried the last pair's
    /// value over to altruists.
    LastPair,
}

/// Full configuration for one generation run.
///
/// # Example
/// ```
/// use saidman_pool_core::{AltruistCpraPolicy, GeneratorConfig};
///
/// let config: GeneratorConfig =
///     serde_json::from_str(r#"{"num_pairs": 10, "altruist_cpra": "last_pair"}"#).unwrap();
/// assert_eq!(config.num_pairs, 10);
/// assert_eq!(config.num_altruists, 0);
/// assert_eq!(config.altruist_cpra, AltruistCpraPolicy::LastPair);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Incompatible pairs to collect
    pub num_pairs: usize,

    /// Altruists to add after the pairs
    pub num_altruists: usize,

    /// Seed for the single RNG stream of the run
    pub seed: u64,

    /// Pair draws allowed per requested pair before giving up
    pub max_attempts_per_pair: usize,

    pub altruist_cpra: AltruistCpraPolicy,

    pub params: SaidmanParams,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_pairs: 0,
            num_altruists: 0,
            seed: DEFAULT_SEED,
            max_attempts_per_pair: DEFAULT_MAX_ATTEMPTS_PER_PAIR,
            altruist_cpra: AltruistCpraPolicy::default(),
            params: SaidmanParams::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new(num_pairs: usize, num_altruists: usize) -> Self {
        Self {
            num_pairs,
            num_altruists,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        self.params.validate()?;
        if self.max_attempts_per_pair == 0 {
            return Err(GeneratorError::InvalidParameter {
                name: "max_attempts_per_pair",
                reason: "must be at least 1".to_string(),
            });
        }
        matrix_side(self.num_pairs, self.num_altruists)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.altruist_cpra, AltruistCpraPolicy::Zero);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_attempt_budget_rejected() {
        let config = GeneratorConfig {
            max_attempts_per_pair: 0,
            ..GeneratorConfig::new(1, 0)
        };
        assert!(matches!(
            config.validate(),
            Err(GeneratorError::InvalidParameter {
                name: "max_attempts_per_pair",
                ..
            })
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_nested_params() {
        let mut config = GeneratorConfig::new(4, 1).with_seed(7);
        config.params.pr_female = 0.5;
        let json = serde_json::to_string(&config).unwrap();
        let back: GeneratorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
