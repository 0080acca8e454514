//! Roster metrics.
//!
//! Computed in a single pass over a finished schedule. Pure and
//! deterministic; map-valued metrics use ordered maps so serialized
//! output is stable.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total shifts | Number of assignments |
//! | Shifts per role / zone / employee | Frequency maps |
//! | Total hours | Sum of assignment durations |
//! | Required slots | Headcount requested over the run |
//! | Total shortfall | Sum of staffing gap shortfalls |
//! | Fill rate | `total_shifts / required_slots` (1.0 if nothing required) |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::RosterSchedule;

/// Aggregate indicators for a roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetrics {
    /// Number of assignments.
    pub total_shifts: usize,
    /// Assignments per role.
    pub shifts_per_role: BTreeMap<String, usize>,
    /// Assignments per zone ID.
    pub shifts_per_zone: BTreeMap<String, usize>,
    /// Assignments per employee ID.
    pub shifts_per_employee: BTreeMap<String, usize>,
    /// Scheduled hours across all assignments.
    pub total_hours: f64,
    /// Headcount requested over the run.
    pub required_slots: u64,
    /// Unfilled headcount.
    pub total_shortfall: u64,
    /// Fraction of requested headcount that was filled (0.0..1.0).
    pub fill_rate: f64,
}

impl ScheduleMetrics {
    /// Computes metrics from a schedule.
    pub fn calculate(schedule: &RosterSchedule) -> Self {
        let mut metrics = Self {
            total_shifts: schedule.assignment_count(),
            required_slots: schedule.required_slots,
            total_shortfall: schedule.total_shortfall(),
            ..Self::default()
        };

        let mut total_minutes: i64 = 0;
        for a in &schedule.assignments {
            *metrics.shifts_per_role.entry(a.role.clone()).or_insert(0) += 1;
            *metrics.shifts_per_zone.entry(a.zone_id.clone()).or_insert(0) += 1;
            *metrics
                .shifts_per_employee
                .entry(a.employee_id.clone())
                .or_insert(0) += 1;
            total_minutes += a.duration_minutes();
        }

        metrics.total_hours = total_minutes as f64 / 60.0;
        metrics.fill_rate = if schedule.required_slots == 0 {
            1.0
        } else {
            metrics.total_shifts as f64 / schedule.required_slots as f64
        };

        metrics
    }

    /// Busiest and least busy employee counts, among employees with shifts.
    pub fn employee_load_range(&self) -> Option<(usize, usize)> {
        let min = self.shifts_per_employee.values().min()?;
        let max = self.shifts_per_employee.values().max()?;
        Some((*min, *max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftAssignment, ShiftWindow, StaffingGap};
    use chrono::{NaiveDate, NaiveTime};

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample_schedule() -> RosterSchedule {
        let lunch = ShiftWindow::new(hm(11, 0), hm(15, 0)); // 4h
        let dinner = ShiftWindow::new(hm(17, 0), hm(22, 30)); // 5.5h
        let mut s = RosterSchedule::new();
        s.add_assignment(ShiftAssignment::new("E1", "Z1", day(1), "server", lunch));
        s.add_assignment(ShiftAssignment::new("E2", "Z1", day(1), "server", lunch));
        s.add_assignment(ShiftAssignment::new("E1", "Z2", day(1), "host", dinner));
        s.add_gap(StaffingGap {
            zone_id: "Z2".into(),
            zone_name: "Bar".into(),
            date: day(1),
            role: "host".into(),
            required: 2,
            assigned: 1,
            shortfall: 1,
        });
        s.required_slots = 4;
        s
    }

    #[test]
    fn test_frequency_maps() {
        let m = ScheduleMetrics::calculate(&sample_schedule());
        assert_eq!(m.total_shifts, 3);
        assert_eq!(m.shifts_per_role["server"], 2);
        assert_eq!(m.shifts_per_role["host"], 1);
        assert_eq!(m.shifts_per_zone["Z1"], 2);
        assert_eq!(m.shifts_per_zone["Z2"], 1);
        assert_eq!(m.shifts_per_employee["E1"], 2);
        assert_eq!(m.employee_load_range(), Some((1, 2)));
    }

    #[test]
    fn test_hours_and_fill_rate() {
        let m = ScheduleMetrics::calculate(&sample_schedule());
        assert!((m.total_hours - 13.5).abs() < 1e-10);
        assert_eq!(m.total_shortfall, 1);
        assert!((m.fill_rate - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_empty_schedule() {
        let m = ScheduleMetrics::calculate(&RosterSchedule::new());
        assert_eq!(m.total_shifts, 0);
        assert!(m.shifts_per_role.is_empty());
        assert!((m.fill_rate - 1.0).abs() < 1e-10);
        assert_eq!(m.employee_load_range(), None);
    }

    #[test]
    fn test_camel_case_output() {
        let value = serde_json::to_value(ScheduleMetrics::calculate(&sample_schedule())).unwrap();
        assert_eq!(value["totalShifts"], 3);
        assert_eq!(value["shiftsPerRole"]["server"], 2);
        assert_eq!(value["shiftsPerZone"]["Z2"], 1);
    }
}
