//! Run-local fairness bookkeeping.

use std::collections::HashMap;

use crate::models::Employee;

/// Per-employee assignment counter for a single scheduling run.
///
/// Created fresh for every run and dropped with it; counts only ever
/// increase while the run is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FairnessTracker {
    counts: HashMap<String, u32>,
}

impl FairnessTracker {
    /// Creates a tracker with a zero count for every employee.
    pub fn new(employees: &[Employee]) -> Self {
        Self {
            counts: employees.iter().map(|e| (e.id.clone(), 0)).collect(),
        }
    }

    /// Assignments made so far for an employee (0 if unknown).
    pub fn count(&self, employee_id: &str) -> u32 {
        self.counts.get(employee_id).copied().unwrap_or(0)
    }

    /// Records one more assignment for an employee.
    pub fn record(&mut self, employee_id: &str) {
        *self.counts.entry(employee_id.to_string()).or_insert(0) += 1;
    }

    /// Snapshot of all counters.
    pub fn counts(&self) -> &HashMap<String, u32> {
        &self.counts
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Difference between the most and least assigned employee.
    pub fn spread(&self) -> u32 {
        let max = self.counts.values().max().copied().unwrap_or(0);
        let min = self.counts.values().min().copied().unwrap_or(0);
        max - min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let employees = vec![Employee::new("E1"), Employee::new("E2")];
        let tracker = FairnessTracker::new(&employees);
        assert_eq!(tracker.counts().len(), 2);
        assert_eq!(tracker.count("E1"), 0);
        assert_eq!(tracker.count("E2"), 0);
        assert_eq!(tracker.count("unknown"), 0);
        assert_eq!(tracker.total(), 0);
    }

    #[test]
    fn test_record_is_monotonic() {
        let mut tracker = FairnessTracker::new(&[Employee::new("E1"), Employee::new("E2")]);
        tracker.record("E1");
        tracker.record("E1");
        tracker.record("E2");
        assert_eq!(tracker.count("E1"), 2);
        assert_eq!(tracker.count("E2"), 1);
        assert_eq!(tracker.total(), 3);
        assert_eq!(tracker.spread(), 1);
    }
}
