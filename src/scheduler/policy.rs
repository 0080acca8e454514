//! Assignment policies.
//!
//! The fairness counter is always the primary ordering key. These
//! policies only decide what happens among equally-loaded candidates
//! and whether the same employee may hold overlapping shifts.

use serde::{Deserialize, Serialize};

/// How candidates with equal fairness counts are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order employees were supplied in (stable sort).
    #[default]
    InputOrder,
    /// Lexicographic by employee ID.
    EmployeeId,
    /// Shuffle each requirement's candidates, drawing from one RNG seeded
    /// at the start of the run, then stable sort by count.
    /// Deterministic for a given seed and input.
    Seeded(u64),
}

/// Whether one employee may hold time-overlapping shifts on the same date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Zones are staffed independently; overlaps are allowed.
    #[default]
    Permit,
    /// An employee already booked on an overlapping window that date
    /// is not eligible.
    Reject,
}

/// Options for [`RosterAssigner`](super::RosterAssigner).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignerOptions {
    /// Tie-break among equal fairness counts.
    #[serde(default)]
    pub tie_break: TieBreak,
    /// Same-day overlap handling.
    #[serde(default)]
    pub overlap: OverlapPolicy,
}

impl AssignerOptions {
    /// Sets the tie-break policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Sets the overlap policy.
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }
}
