//! Rostering domain models.
//!
//! Provides the data types consumed and produced by a scheduling run.
//!
//! # Domain Mappings
//!
//! | u-roster | Restaurant | Retail | Hospital |
//! |----------|-----------|--------|----------|
//! | Employee | Server/Cook | Clerk | Nurse |
//! | Zone | Section | Department | Ward |
//! | ZoneRequirement | Section cover | Floor cover | Ward staffing |
//! | ShiftAssignment | Shift | Shift | Rota entry |

mod calendar;
mod employee;
mod request;
mod schedule;
mod zone;

pub use calendar::{ShiftWindow, Weekday};
pub use employee::{AvailabilityEntry, Employee};
pub use request::RunRequest;
pub use schedule::{RosterSchedule, ShiftAssignment, ShiftStatus, StaffingGap};
pub use zone::{Zone, ZoneRequirement};
