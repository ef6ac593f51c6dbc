//! Bounded per-pool value history.

use std::collections::VecDeque;

use super::money::Usd;

/// Default number of samples kept per pool.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Fixed-capacity ring of USD value samples, oldest evicted first.
#[derive(Debug, Clone)]
pub struct ValueHistory {
    samples: VecDeque<Usd>,
    capacity: usize,
}

impl ValueHistory {
    /// Create an empty history. A capacity of zero is treated as one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest when full.
    pub fn push(&mut self, value: Usd) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Usd> {
        self.samples.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<Usd> {
        self.samples.back().copied()
    }

    #[must_use]
    pub fn oldest(&self) -> Option<Usd> {
        self.samples.front().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ValueHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_push_within_capacity() {
        let mut history = ValueHistory::with_capacity(3);
        history.push(Decimal::from(1));
        history.push(Decimal::from(2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.oldest(), Some(Decimal::from(1)));
        assert_eq!(history.latest(), Some(Decimal::from(2)));
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut history = ValueHistory::with_capacity(3);
        for i in 1..=5 {
            history.push(Decimal::from(i));
        }

        let values: Vec<Decimal> = history.iter().copied().collect();
        assert_eq!(values, vec![Decimal::from(3), Decimal::from(4), Decimal::from(5)]);
    }

    #[test]
    fn test_default_capacity() {
        let mut history = ValueHistory::default();
        for i in 0..250 {
            history.push(Decimal::from(i));
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(history.oldest(), Some(Decimal::from(150)));
    }

    #[test]
    fn test_zero_capacity_keeps_one_sample() {
        let mut history = ValueHistory::with_capacity(0);
        history.push(Decimal::from(7));
        history.push(Decimal::from(8));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some(Decimal::from(8)));
    }
}
