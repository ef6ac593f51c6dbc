//! Application services (use cases).
//!
//! These services combine domain logic with the outbound ports to run the
//! two independent decision cycles: strategy allocation and risk monitoring.

pub mod risk;
pub mod strategy;
