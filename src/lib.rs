//! Fairness-aware shift rostering for the U-Engine ecosystem.
//!
//! Given a date range, employees with roles and weekly availability, and
//! zones with per-weekday staffing requirements, produces a day-by-day
//! assignment of employees to zone shifts. Ties between equally eligible
//! employees go to whoever has been scheduled least so far in the run.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Employee`, `Zone`, `ZoneRequirement`,
//!   `ShiftAssignment`, `StaffingGap`, `RosterSchedule`
//! - **`scheduler`**: `RosterAssigner` greedy heuristic and `FairnessTracker`
//! - **`analysis`**: `ScheduleMetrics` and the optional narrative summary
//! - **`source`**: Employee/zone loaders (in-memory, JSON directory)
//! - **`service`**: `RosterService`, the load → validate → assign pipeline
//! - **`validation`**: Input integrity checks (fatal duplicate IDs, non-fatal
//!   window and role warnings)
//! - **`config`**: Layered figment configuration
//!
//! # Architecture
//!
//! Persistence, HTTP exposure, and authentication belong to the calling
//! application. This crate is invoked in-process and owns no wire format.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Pinedo (2009), "Planning and Scheduling in Manufacturing and Services",
//!   workforce scheduling

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod source;
pub mod validation;

pub use config::{NarrativeConfig, RosterConfig};
pub use error::{ConfigError, NarrativeError, RosterError, SourceError};
pub use service::RosterService;
