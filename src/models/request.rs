//! Scheduling run request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A request to roster one organization over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Organization whose employees and zones are loaded.
    pub organization_id: String,
    /// First date to schedule (ISO `YYYY-MM-DD`).
    pub start_date: NaiveDate,
    /// Last date to schedule, inclusive.
    pub end_date: NaiveDate,
}

impl RunRequest {
    /// Creates a new request.
    pub fn new(
        organization_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            organization_id: organization_id.into(),
            start_date,
            end_date,
        }
    }

    /// Number of days covered (0 when the range is reversed).
    pub fn day_count(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1).max(0)
    }
}
