//! Per-frame time budget accounting
//!
//! Tracks the cumulative cost of intersection tests within one evaluation
//! pass so the scheduler can stop visiting picks once the caller-configured
//! ceiling is reached. Reset every frame by constructing a fresh budget.

use std::time::Duration;

/// Time budget for one evaluation pass
///
/// A budget of 0 microseconds means unbounded: the pass evaluates every
/// live enabled pick. Accounting is monotonic within the pass.
pub struct TimeBudget {
    /// Maximum time allowed (microseconds); 0 = unbounded
    budget_us: u64,
    /// Time used so far this pass (microseconds)
    used_us: u64,
}

impl TimeBudget {
    /// Create a budget for one pass
    ///
    /// # Arguments
    /// * `budget_us` - Maximum microseconds to spend; 0 = unbounded
    pub fn new(budget_us: u64) -> Self {
        Self {
            budget_us,
            used_us: 0,
        }
    }

    /// Whether this budget places no ceiling on the pass
    pub fn unbounded(&self) -> bool {
        self.budget_us == 0
    }

    /// Charge the measured cost of one intersection call
    pub fn charge(&mut self, cost: Duration) {
        let cost_us = u64::try_from(cost.as_micros()).unwrap_or(u64::MAX);
        self.used_us = self.used_us.saturating_add(cost_us);
    }

    /// Time used so far in microseconds
    pub fn used_us(&self) -> u64 {
        self.used_us
    }

    /// Time remaining in microseconds (u64::MAX when unbounded)
    pub fn remaining_us(&self) -> u64 {
        if self.unbounded() {
            u64::MAX
        } else {
            self.budget_us.saturating_sub(self.used_us)
        }
    }

    /// Whether the pass should stop visiting further picks
    pub fn exhausted(&self) -> bool {
        !self.unbounded() && self.used_us >= self.budget_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_new() {
        let budget = TimeBudget::new(2000);
        assert_eq!(budget.used_us(), 0);
        assert_eq!(budget.remaining_us(), 2000);
        assert!(!budget.exhausted());
    }

    #[test]
    fn test_budget_charge() {
        let mut budget = TimeBudget::new(2000);
        budget.charge(Duration::from_micros(500));

        assert_eq!(budget.used_us(), 500);
        assert_eq!(budget.remaining_us(), 1500);
        assert!(!budget.exhausted());
    }

    #[test]
    fn test_budget_exhausted_at_ceiling() {
        let mut budget = TimeBudget::new(1000);
        budget.charge(Duration::from_micros(600));
        assert!(!budget.exhausted());

        budget.charge(Duration::from_micros(400));
        assert!(budget.exhausted());
        assert_eq!(budget.remaining_us(), 0);
    }

    #[test]
    fn test_budget_overshoot_saturates() {
        let mut budget = TimeBudget::new(100);
        budget.charge(Duration::from_micros(5000));

        assert!(budget.exhausted());
        assert_eq!(budget.remaining_us(), 0);
        assert_eq!(budget.used_us(), 5000);
    }

    #[test]
    fn test_budget_zero_is_unbounded() {
        let mut budget = TimeBudget::new(0);
        assert!(budget.unbounded());

        budget.charge(Duration::from_secs(10));
        assert!(!budget.exhausted());
        assert_eq!(budget.remaining_us(), u64::MAX);
    }

    #[test]
    fn test_budget_charge_accumulates() {
        let mut budget = TimeBudget::new(10_000);
        for _ in 0..10 {
            budget.charge(Duration::from_micros(250));
        }
        assert_eq!(budget.used_us(), 2500);
        assert_eq!(budget.remaining_us(), 7500);
    }
}
