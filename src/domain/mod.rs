//! Pool allocation domain types. No I/O.
//!
//! - [`Market`] / [`PoolStats`] - pool state and yield metrics
//! - [`Position`] - a wallet's stake in one pool
//! - [`PoolScore`] - a scored pool, built in one step from its sub-scores
//! - [`Signal`] - a recommended deposit or withdrawal
//! - [`RiskAlert`] / [`RiskLevel`] - detected risk conditions
//! - [`ValueHistory`] - bounded per-pool value samples

pub mod alert;
pub mod history;
pub mod id;
pub mod market;
pub mod money;
pub mod position;
pub mod score;
pub mod signal;

pub use alert::{AlertCategory, AlertSeverity, RiskAlert, RiskLevel};
pub use history::{ValueHistory, DEFAULT_HISTORY_CAPACITY};
pub use id::MarketKey;
pub use market::{Market, PoolStats, RiskScoreParams};
pub use money::Usd;
pub use position::Position;
pub use score::{PoolScore, ScoreWeights, SubScores};
pub use signal::{Signal, SignalAction};
