use crate::Probability;
use crate::Utility;
use std::time::Duration;

/// Knobs of the training loop: regret bounds, pruning, and the timers of
/// the maintenance duties.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub regret_floor: Utility,
    pub pruning_threshold: Utility,
    pub pruning_warmup: usize,
    pub pruning_explore: Probability,
    /// iterations between average strategy updates
    pub strategy_interval: usize,
    pub discount_interval: Duration,
    /// training time after which discounting stops
    pub discount_cutoff: Duration,
    pub log_interval: Duration,
    pub checkpoint_interval: Duration,
    /// worker threads, all cores when absent
    pub threads: Option<usize>,
    /// stop after this many iterations, run until interrupted when absent
    pub iterations: Option<usize>,
    pub seed: u64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            regret_floor: crate::REGRET_MIN,
            pruning_threshold: crate::PRUNING_THRESHOLD,
            pruning_warmup: crate::PRUNING_WARMUP,
            pruning_explore: crate::PRUNING_EXPLORE,
            strategy_interval: crate::STRATEGY_INTERVAL,
            discount_interval: crate::DISCOUNT_INTERVAL,
            discount_cutoff: crate::DISCOUNT_CUTOFF,
            log_interval: crate::TRAINING_LOG_INTERVAL,
            checkpoint_interval: crate::CHECKPOINT_INTERVAL,
            threads: None,
            iterations: None,
            seed: 0,
        }
    }
}

impl Schedule {
    pub fn threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
    pub fn discount(&self) -> super::discount::Discount {
        super::discount::Discount::from((self.discount_interval, self.discount_cutoff))
    }
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.pruning_threshold > self.regret_floor,
            "pruning threshold must sit above the regret floor"
        );
        anyhow::ensure!(
            (0. ..=1.).contains(&self.pruning_explore),
            "pruning exploration is a probability"
        );
        anyhow::ensure!(self.strategy_interval > 0, "strategy interval must be positive");
        anyhow::ensure!(!self.discount_interval.is_zero(), "discount interval must be positive");
        anyhow::ensure!(self.threads != Some(0), "need at least one worker");
        Ok(())
    }
}
