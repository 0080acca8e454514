//! Employee model.
//!
//! Employees are the people being rostered. Each holds a set of roles
//! and a weekly availability pattern. Employees are owned by the
//! availability source and treated as immutable for a scheduling run.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ShiftWindow, Weekday};

/// A person that can be assigned to zone shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Roles this employee may fill (e.g., "server", "host").
    #[serde(default)]
    pub roles: BTreeSet<String>,
    /// Weekly availability pattern.
    #[serde(default)]
    pub availability: Vec<AvailabilityEntry>,
}

/// A per-weekday availability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    /// Day this entry applies to.
    pub day_of_week: Weekday,
    /// Earliest time the employee can start.
    pub start_time: NaiveTime,
    /// Latest time the employee can finish.
    pub end_time: NaiveTime,
    /// Explicit availability flag. `false` entries never make an
    /// employee eligible, whatever their window.
    pub can_work: bool,
}

impl AvailabilityEntry {
    /// Creates an entry marked as workable.
    pub fn new(day_of_week: Weekday, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            day_of_week,
            start_time,
            end_time,
            can_work: true,
        }
    }

    /// Creates an entry marked as unavailable.
    pub fn unavailable(day_of_week: Weekday, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            can_work: false,
            ..Self::new(day_of_week, start_time, end_time)
        }
    }

    /// The entry's time window.
    pub fn window(&self) -> ShiftWindow {
        ShiftWindow::new(self.start_time, self.end_time)
    }

    /// Whether this entry makes the employee available for `shift` on `day`.
    pub fn covers(&self, day: Weekday, shift: &ShiftWindow) -> bool {
        self.can_work && self.day_of_week == day && self.window().contains(shift)
    }
}

impl Employee {
    /// Creates an employee with no roles or availability.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            roles: BTreeSet::new(),
            availability: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Adds an availability entry.
    pub fn with_availability(mut self, entry: AvailabilityEntry) -> Self {
        self.availability.push(entry);
        self
    }

    /// Adds a workable availability window for a weekday.
    pub fn available_on(self, day: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        self.with_availability(AvailabilityEntry::new(day, start, end))
    }

    /// Whether this employee holds a role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Whether any workable entry for `day` fully covers `shift`.
    pub fn is_available_for(&self, day: Weekday, shift: &ShiftWindow) -> bool {
        self.availability.iter().any(|a| a.covers(day, shift))
    }

    /// Whether this employee can fill `role` during `shift` on `day`.
    pub fn is_eligible(&self, role: &str, day: Weekday, shift: &ShiftWindow) -> bool {
        self.has_role(role) && self.is_available_for(day, shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_employee_builder() {
        let e = Employee::new("E1")
            .with_name("Dana")
            .with_role("server")
            .with_role("host")
            .available_on(Weekday::Monday, hm(9, 0), hm(17, 0));

        assert_eq!(e.id, "E1");
        assert_eq!(e.name, "Dana");
        assert!(e.has_role("server"));
        assert!(e.has_role("host"));
        assert!(!e.has_role("cook"));
        assert_eq!(e.availability.len(), 1);
        assert!(e.availability[0].can_work);
    }

    #[test]
    fn test_eligibility_requires_role_and_cover() {
        let e = Employee::new("E1")
            .with_role("server")
            .available_on(Weekday::Monday, hm(8, 0), hm(18, 0));
        let shift = ShiftWindow::new(hm(9, 0), hm(17, 0));

        assert!(e.is_eligible("server", Weekday::Monday, &shift));
        assert!(!e.is_eligible("cook", Weekday::Monday, &shift));
        assert!(!e.is_eligible("server", Weekday::Tuesday, &shift));

        let late = ShiftWindow::new(hm(12, 0), hm(20, 0));
        assert!(!e.is_eligible("server", Weekday::Monday, &late));
    }

    #[test]
    fn test_cannot_work_entry_ignored() {
        let e = Employee::new("E1")
            .with_role("server")
            .with_availability(AvailabilityEntry::unavailable(
                Weekday::Monday,
                hm(0, 0),
                hm(23, 59),
            ));
        let shift = ShiftWindow::new(hm(9, 0), hm(17, 0));
        assert!(!e.is_available_for(Weekday::Monday, &shift));
    }

    #[test]
    fn test_any_entry_may_cover() {
        // Split availability: morning entry does not cover, evening entry does
        let e = Employee::new("E1")
            .with_role("cook")
            .available_on(Weekday::Friday, hm(6, 0), hm(11, 0))
            .available_on(Weekday::Friday, hm(16, 0), hm(23, 0));
        let dinner = ShiftWindow::new(hm(17, 0), hm(22, 0));
        assert!(e.is_eligible("cook", Weekday::Friday, &dinner));
    }

    #[test]
    fn test_deserialize_record() {
        let json = r#"{
            "id": "E7",
            "roles": ["server"],
            "availability": [
                {"day_of_week": "Monday", "start_time": "09:00:00", "end_time": "17:00:00", "can_work": true}
            ]
        }"#;
        let e: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(e.id, "E7");
        assert!(e.name.is_empty());
        assert!(e.is_eligible(
            "server",
            Weekday::Monday,
            &ShiftWindow::new(hm(9, 0), hm(17, 0))
        ));
    }
}
