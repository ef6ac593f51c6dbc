//! Name to constructor mapping for strategy variants.

use super::balanced::BalancedStrategy;
use super::high_yield::HighYieldStrategy;
use super::{Strategy, StrategySettings};
use crate::error::ConfigError;

type Constructor = fn(StrategySettings) -> Box<dyn Strategy>;

/// Registry of strategy constructors, keyed by name.
///
/// Creation by an unknown name fails with [`ConfigError::UnknownStrategy`],
/// so a misconfigured variant is caught before any cycle runs.
pub struct StrategyRegistry {
    entries: Vec<(&'static str, Constructor)>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry with the built-in `balanced` and `high_yield` variants.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(BalancedStrategy::NAME, |settings| {
            Box::new(BalancedStrategy::new(settings))
        });
        registry.register(HighYieldStrategy::NAME, |settings| {
            Box::new(HighYieldStrategy::new(settings))
        });
        registry
    }

    /// Register a constructor. A later registration under the same name
    /// replaces the earlier one.
    pub fn register(&mut self, name: &'static str, constructor: Constructor) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = constructor;
        } else {
            self.entries.push((name, constructor));
        }
    }

    /// Registered names in registration order.
    #[must_use]
    pub fn available(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    /// Check whether a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Construct the named strategy.
    pub fn create(
        &self,
        name: &str,
        settings: StrategySettings,
    ) -> Result<Box<dyn Strategy>, ConfigError> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, constructor)| constructor(settings))
            .ok_or_else(|| ConfigError::UnknownStrategy {
                name: name.to_string(),
                available: self.available(),
            })
    }

    /// Name and description of every registered variant.
    #[must_use]
    pub fn describe(&self) -> Vec<(&'static str, &'static str)> {
        self.entries
            .iter()
            .map(|(name, constructor)| {
                (*name, constructor(StrategySettings::default()).description())
            })
            .collect()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
