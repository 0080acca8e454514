//! Roster (solution) model.
//!
//! A roster schedule is the ordered list of shift assignments produced
//! by one scheduling run, together with the staffing gaps the run could
//! not fill.
//!
//! # Ordering
//! Assignments are kept in generation order: date-major, then zone,
//! then requirement, then the order employees were picked.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::ShiftWindow;

/// The result of a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSchedule {
    /// Shift assignments in generation order.
    pub assignments: Vec<ShiftAssignment>,
    /// Requirement slots that could not be fully staffed.
    pub gaps: Vec<StaffingGap>,
    /// Total headcount requested over the run (sum of `required_count`
    /// over every matching requirement-date).
    pub required_slots: u64,
}

/// Lifecycle status of an assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Created by the assigner, not yet confirmed.
    #[default]
    Scheduled,
}

/// An employee-zone-date assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// Assigned employee.
    pub employee_id: String,
    /// Zone the shift belongs to.
    pub zone_id: String,
    /// Calendar date of the shift.
    pub shift_date: NaiveDate,
    /// Shift start time.
    pub start_time: NaiveTime,
    /// Shift end time.
    pub end_time: NaiveTime,
    /// Role being filled.
    pub role: String,
    /// Always `Scheduled` when produced by the assigner.
    pub status: ShiftStatus,
}

/// A requirement slot that was not fully staffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingGap {
    /// Zone with the gap.
    pub zone_id: String,
    /// Zone name, for display.
    pub zone_name: String,
    /// Date of the gap.
    pub date: NaiveDate,
    /// Role that could not be filled.
    pub role: String,
    /// Requested headcount.
    pub required: u32,
    /// Headcount actually assigned.
    pub assigned: u32,
    /// `required - assigned`.
    pub shortfall: u32,
}

impl ShiftAssignment {
    /// Creates a scheduled assignment.
    pub fn new(
        employee_id: impl Into<String>,
        zone_id: impl Into<String>,
        shift_date: NaiveDate,
        role: impl Into<String>,
        window: ShiftWindow,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            zone_id: zone_id.into(),
            shift_date,
            start_time: window.start,
            end_time: window.end,
            role: role.into(),
            status: ShiftStatus::Scheduled,
        }
    }

    /// The assigned time window.
    pub fn window(&self) -> ShiftWindow {
        ShiftWindow::new(self.start_time, self.end_time)
    }

    /// Shift length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.window().duration_minutes()
    }
}

impl StaffingGap {
    /// Human-readable description, e.g. for UI warnings.
    pub fn message(&self) -> String {
        format!(
            "{} on {}: {} short of {} '{}' ({} assigned)",
            display_zone(&self.zone_id, &self.zone_name),
            self.date,
            self.shortfall,
            self.required,
            self.role,
            self.assigned
        )
    }
}

fn display_zone<'a>(id: &'a str, name: &'a str) -> &'a str {
    if name.is_empty() {
        id
    } else {
        name
    }
}

impl RosterSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: ShiftAssignment) {
        self.assignments.push(assignment);
    }

    /// Adds a staffing gap.
    pub fn add_gap(&mut self, gap: StaffingGap) {
        self.gaps.push(gap);
    }

    /// Whether every requested slot was filled.
    pub fn is_fully_staffed(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the schedule holds no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// All assignments for an employee.
    pub fn assignments_for_employee(&self, employee_id: &str) -> Vec<&ShiftAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .collect()
    }

    /// All assignments in a zone.
    pub fn assignments_for_zone(&self, zone_id: &str) -> Vec<&ShiftAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.zone_id == zone_id)
            .collect()
    }

    /// All assignments on a date.
    pub fn assignments_on(&self, date: NaiveDate) -> Vec<&ShiftAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.shift_date == date)
            .collect()
    }

    /// Sum of all shortfalls.
    pub fn total_shortfall(&self) -> u64 {
        self.gaps.iter().map(|g| u64::from(g.shortfall)).sum()
    }
}
