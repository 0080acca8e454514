//! Schedule analysis.
//!
//! Aggregates a finished roster into metrics and, optionally, a
//! natural-language summary from an external collaborator.
//!
//! # Pipeline
//!
//! 1. [`ScheduleMetrics::calculate`]: pure, single pass over assignments.
//! 2. [`NarrativeRequest`]: structured summary of the metrics and gaps.
//! 3. [`NarrativeGenerator`]: external call, bounded by a timeout.
//!
//! Step 3 may fail or time out; the analysis still completes with
//! [`NARRATIVE_UNAVAILABLE`] as its narrative.

mod analyzer;
mod metrics;
mod narrative;

pub use analyzer::{ScheduleAnalysis, ScheduleAnalyzer, NARRATIVE_UNAVAILABLE};
pub use metrics::ScheduleMetrics;
pub use narrative::{ChatNarrativeGenerator, NarrativeGenerator, NarrativeRequest};
