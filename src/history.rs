//! Bounded price history feeding the chart.

use std::collections::VecDeque;

/// Default number of prices retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// FIFO-bounded sequence of recent prices, oldest first.
#[derive(Clone, Debug)]
pub struct PriceHistory {
    prices: VecDeque<f64>,
    capacity: usize,
}

impl PriceHistory {
    /// Creates an empty history. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            prices: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a price, evicting the oldest one at capacity.
    pub fn push(&mut self, price: f64) {
        if self.prices.len() >= self.capacity {
            self.prices.pop_front();
        }
        self.prices.push_back(price);
    }

    /// Copies the retained prices in append order.
    pub fn snapshot(&self) -> Vec<f64> {
        self.prices.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_capacity() {
        let mut history = PriceHistory::new(20);
        for i in 0..25 {
            history.push(f64::from(i));
        }

        assert_eq!(history.len(), 20);
        let expected: Vec<f64> = (5..25).map(f64::from).collect();
        assert_eq!(history.snapshot(), expected);
    }

    #[test]
    fn keeps_order_below_capacity() {
        let mut history = PriceHistory::new(3);
        history.push(1.0);
        history.push(2.0);
        assert_eq!(history.snapshot(), vec![1.0, 2.0]);
    }

    #[test]
    fn zero_capacity_keeps_latest() {
        let mut history = PriceHistory::new(0);
        history.push(1.0);
        history.push(2.0);
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.snapshot(), vec![2.0]);
    }

    #[test]
    fn starts_empty() {
        let history = PriceHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
    }
}
