//! Risk monitoring.
//!
//! The [`RiskManager`] watches current holdings independently of the strategy
//! engine, producing alerts and deciding when an emergency exit is needed.

mod manager;
mod summary;

pub use manager::{MarketsByKey, RiskManager, RiskSettings};
pub use summary::RiskSummary;
