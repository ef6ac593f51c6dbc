//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`]: Builders for markets, pool stats and positions.
//! - [`recording`]: In-memory data source plus executor and notifier
//!   doubles that record what they receive.
//! - [`config`]: Canonical test settings.

pub mod config;
pub mod domain;
pub mod recording;
