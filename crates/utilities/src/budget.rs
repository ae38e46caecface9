use std::time::Duration;
use std::time::Instant;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Limits the amount of work a discovery or search session may perform.
///
/// Both limits are optional, a budget without limits never runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    /// The maximum number of steps, the meaning of a step is defined by the caller.
    pub max_steps: Option<u64>,

    /// The maximum wall clock time.
    pub time_limit: Option<Duration>,
}

/// Signals that a session crossed its [Budget].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetExceeded {
    #[error("exceeded the budget of {limit} steps")]
    Steps { limit: u64 },

    #[error("exceeded the time limit of {limit:?}")]
    Time { limit: Duration },
}

impl Budget {
    pub fn unlimited() -> Budget {
        Budget::default()
    }

    pub fn with_max_steps(max_steps: u64) -> Budget {
        Budget {
            max_steps: Some(max_steps),
            time_limit: None,
        }
    }
}

/// Keeps track of the steps and time spent against a [Budget].
#[derive(Debug)]
pub struct BudgetTracker {
    budget: Budget,
    steps: u64,
    start: Instant,
}

impl BudgetTracker {
    pub fn new(budget: Budget) -> BudgetTracker {
        BudgetTracker {
            budget,
            steps: 0,
            start: Instant::now(),
        }
    }

    /// Records one step, fails when either limit is crossed.
    pub fn tick(&mut self) -> Result<(), BudgetExceeded> {
        self.steps += 1;

        if let Some(limit) = self.budget.max_steps {
            if self.steps > limit {
                return Err(BudgetExceeded::Steps { limit });
            }
        }

        if let Some(limit) = self.budget.time_limit {
            if self.start.elapsed() > limit {
                return Err(BudgetExceeded::Time { limit });
            }
        }

        Ok(())
    }

    /// The number of steps recorded so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_step_budget() {
        let mut tracker = BudgetTracker::new(Budget::with_max_steps(3));

        for _ in 0..3 {
            assert!(tracker.tick().is_ok());
        }

        assert_eq!(tracker.tick(), Err(BudgetExceeded::Steps { limit: 3 }));
        assert_eq!(tracker.steps(), 4);
    }

    #[test]
    fn test_unlimited_budget() {
        let mut tracker = BudgetTracker::new(Budget::unlimited());

        for _ in 0..10_000 {
            assert!(tracker.tick().is_ok());
        }
    }

    #[test]
    fn test_zero_time_limit() {
        let mut tracker = BudgetTracker::new(Budget {
            max_steps: None,
            time_limit: Some(Duration::ZERO),
        });

        std::thread::sleep(Duration::from_millis(1));
        assert!(matches!(tracker.tick(), Err(BudgetExceeded::Time { .. })));
    }

    #[test]
    fn test_budget_from_json() {
        let budget: Budget = serde_json::from_str(r#"{ "max_steps": 10 }"#).unwrap();
        assert_eq!(budget, Budget::with_max_steps(10));
    }
}
