//! Roster assignment.
//!
//! Provides the greedy, fairness-aware assigner and its run-local
//! bookkeeping.
//!
//! # Algorithm
//!
//! `RosterAssigner` walks the date range day by day and, for each
//! matching zone requirement, fills the slot with the eligible employees
//! who have been assigned least so far. It is deterministic and fast,
//! not optimal.
//!
//! # Policies
//!
//! - [`TieBreak`]: ordering among equally-loaded candidates.
//! - [`OverlapPolicy`]: whether an employee may be double-booked on
//!   overlapping windows of the same date.

mod fairness;
mod policy;
mod roster;

pub use fairness::FairnessTracker;
pub use policy::{AssignerOptions, OverlapPolicy, TieBreak};
pub use roster::RosterAssigner;
