//! Pool selection lists.

use serde::Deserialize;

use crate::application::strategy::PoolFilter;

/// Pool names to restrict to or exclude.
///
/// An empty whitelist admits every pool not on the blacklist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoolsConfig {
    #[serde(default)]
    pub whitelist: Vec<String>,
    #[serde(default)]
    pub blacklist: Vec<String>,
}

impl From<PoolsConfig> for PoolFilter {
    fn from(config: PoolsConfig) -> Self {
        Self::new(config.whitelist, config.blacklist)
    }
}
