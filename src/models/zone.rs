//! Zone and staffing requirement models.
//!
//! A zone is a work area (e.g., a restaurant section) that needs a
//! number of people in given roles on given weekdays.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{ShiftWindow, Weekday};

/// A work area with weekly staffing requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique zone identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Weekly requirements. Order is significant for assignment order.
    #[serde(default)]
    pub requirements: Vec<ZoneRequirement>,
}

/// A (weekday, role, headcount, window) tuple a zone needs filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRequirement {
    /// Day the requirement recurs on.
    pub day_of_week: Weekday,
    /// Role that must be filled.
    pub role: String,
    /// Number of people needed. Zero means no one is scheduled.
    pub required_count: u32,
    /// Shift start time.
    pub shift_start: NaiveTime,
    /// Shift end time.
    pub shift_end: NaiveTime,
}

impl ZoneRequirement {
    /// Creates a new requirement.
    pub fn new(
        day_of_week: Weekday,
        role: impl Into<String>,
        required_count: u32,
        shift_start: NaiveTime,
        shift_end: NaiveTime,
    ) -> Self {
        Self {
            day_of_week,
            role: role.into(),
            required_count,
            shift_start,
            shift_end,
        }
    }

    /// The shift window this requirement covers.
    pub fn window(&self) -> ShiftWindow {
        ShiftWindow::new(self.shift_start, self.shift_end)
    }

    /// Whether anyone could ever fill this requirement: the role is not
    /// blank and the window has positive length. Unfillable requirements
    /// still produce staffing gaps.
    pub fn is_fillable(&self) -> bool {
        !self.role.trim().is_empty() && self.window().is_valid()
    }
}

impl Zone {
    /// Creates a zone with no requirements.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            requirements: Vec::new(),
        }
    }

    /// Sets the zone name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a requirement.
    pub fn with_requirement(mut self, requirement: ZoneRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Requirements recurring on `day`, in declaration order.
    pub fn requirements_on(&self, day: Weekday) -> impl Iterator<Item = &ZoneRequirement> {
        self.requirements
            .iter()
            .filter(move |r| r.day_of_week == day)
    }

    /// Total headcount needed across the week.
    pub fn weekly_headcount(&self) -> u32 {
        self.requirements.iter().map(|r| r.required_count).sum()
    }
}
