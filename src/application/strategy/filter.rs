//! Allow-list / deny-list pool filter.

use crate::domain::Market;

/// Filters pools by display name.
///
/// A non-empty whitelist admits only listed names; the blacklist always
/// excludes. Matching is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolFilter {
    whitelist: Vec<String>,
    blacklist: Vec<String>,
}

impl PoolFilter {
    #[must_use]
    pub fn new(whitelist: Vec<String>, blacklist: Vec<String>) -> Self {
        Self {
            whitelist,
            blacklist,
        }
    }

    /// Check whether a pool name passes the filter.
    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        if !self.whitelist.is_empty() && !self.whitelist.iter().any(|n| n == name) {
            return false;
        }
        !self.blacklist.iter().any(|n| n == name)
    }

    /// Markets that pass the filter, in input order.
    #[must_use]
    pub fn apply<'a>(&self, markets: &'a [Market]) -> Vec<&'a Market> {
        markets.iter().filter(|m| self.allows(m.name())).collect()
    }

    #[must_use]
    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    #[must_use]
    pub fn blacklist(&self) -> &[String] {
        &self.blacklist
    }
}
