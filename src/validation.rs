//! Input validation for rostering runs.
//!
//! Two tiers:
//! - [`validate_input`] rejects duplicate employee or zone IDs. Fairness
//!   counters and booked windows are keyed by employee ID, and assignments
//!   and gaps name zones by ID, so duplicates leave the roster ambiguous.
//! - [`input_warnings`] reports data that is legal but suspicious: workable
//!   availability with an empty or inverted window, requirements with a
//!   blank role or an empty or inverted window. The assigner never uses such
//!   availability and turns such requirements into staffing gaps.
//!
//! `can_work = false` entries are never checked; they never make anyone
//! eligible, whatever their window.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{Employee, Zone};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two employees or two zones share the same ID. Fatal.
    DuplicateId,
    /// A window has `start >= end`.
    InvalidTimeWindow,
    /// A requirement names no role.
    EmptyRole,
}

impl ValidationErrorKind {
    /// Whether a finding of this kind aborts a run.
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::DuplicateId)
    }
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of a scheduling run.
///
/// Checks:
/// 1. No duplicate employee IDs
/// 2. No duplicate zone IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(employees: &[Employee], zones: &[Zone]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut employee_ids = HashSet::new();
    for employee in employees {
        if !employee_ids.insert(employee.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", employee.id),
            ));
        }
    }

    let mut zone_ids = HashSet::new();
    for zone in zones {
        if !zone_ids.insert(zone.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate zone ID: {}", zone.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collects non-fatal findings.
///
/// Checks:
/// 1. Every workable availability entry has `start_time < end_time`
/// 2. Every requirement has `shift_start < shift_end`
/// 3. Every requirement names a non-blank role
pub fn input_warnings(employees: &[Employee], zones: &[Zone]) -> Vec<ValidationError> {
    let mut warnings = Vec::new();

    for employee in employees {
        for entry in employee.availability.iter().filter(|a| a.can_work) {
            if !entry.window().is_valid() {
                warnings.push(ValidationError::new(
                    ValidationErrorKind::InvalidTimeWindow,
                    format!(
                        "Employee '{}' has an invalid {} availability window {}",
                        employee.id,
                        entry.day_of_week,
                        entry.window()
                    ),
                ));
            }
        }
    }

    for zone in zones {
        for req in &zone.requirements {
            if req.role.trim().is_empty() {
                warnings.push(ValidationError::new(
                    ValidationErrorKind::EmptyRole,
                    format!(
                        "Zone '{}' has a {} requirement with a blank role",
                        zone.id, req.day_of_week
                    ),
                ));
            }
            if !req.window().is_valid() {
                warnings.push(ValidationError::new(
                    ValidationErrorKind::InvalidTimeWindow,
                    format!(
                        "Zone '{}' has an invalid {} shift window {} for '{}'",
                        zone.id,
                        req.day_of_week,
                        req.window(),
                        req.role
                    ),
                ));
            }
        }
    }

    warnings
}
