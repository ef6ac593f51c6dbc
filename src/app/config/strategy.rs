//! Strategy selection and allocation parameters.

use serde::Deserialize;

/// Strategy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyConfig {
    /// Registered strategy name (`balanced` or `high_yield`).
    #[serde(rename = "type", default = "default_strategy_type")]
    pub strategy_type: String,
    /// Minimum APY (percent) to enter or keep a pool.
    #[serde(default = "default_min_apy")]
    pub min_apy: f64,
    /// APY (percent) the allocation aims for. Reported only.
    #[serde(default = "default_target_apy")]
    pub target_apy: f64,
    /// Maximum share of the portfolio cap in one pool (percent).
    #[serde(default = "default_max_single_pool_pct")]
    pub max_single_pool_pct: f64,
    #[serde(default = "default_min_pools")]
    pub min_pools: usize,
    #[serde(default = "default_max_pools")]
    pub max_pools: usize,
    /// Allowed deviation (percentage points) from target share before trimming.
    #[serde(default = "default_rebalance_threshold")]
    pub rebalance_threshold: f64,
    /// Factor by which the best APY must beat a held pool to switch.
    #[serde(default = "default_switch_apy_multiplier")]
    pub switch_apy_multiplier: f64,
}

fn default_strategy_type() -> String {
    "balanced".to_string()
}

const fn default_min_apy() -> f64 {
    10.0
}

const fn default_target_apy() -> f64 {
    20.0
}

const fn default_max_single_pool_pct() -> f64 {
    30.0
}

const fn default_min_pools() -> usize {
    2
}

const fn default_max_pools() -> usize {
    5
}

const fn default_rebalance_threshold() -> f64 {
    5.0
}

const fn default_switch_apy_multiplier() -> f64 {
    1.5
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            strategy_type: default_strategy_type(),
            min_apy: default_min_apy(),
            target_apy: default_target_apy(),
            max_single_pool_pct: default_max_single_pool_pct(),
            min_pools: default_min_pools(),
            max_pools: default_max_pools(),
            rebalance_threshold: default_rebalance_threshold(),
            switch_apy_multiplier: default_switch_apy_multiplier(),
        }
    }
}
