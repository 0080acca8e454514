//! Schedule analyzer.
//!
//! Combines pure metrics with an optional, time-bounded narrative call.
//! The narrative never fails the analysis: a missing collaborator, an
//! error, or a timeout all degrade to [`NARRATIVE_UNAVAILABLE`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ChatNarrativeGenerator, NarrativeGenerator, NarrativeRequest, ScheduleMetrics};
use crate::config::NarrativeConfig;
use crate::error::NarrativeError;
use crate::models::{RosterSchedule, StaffingGap};

/// Narrative used when no text could be generated.
pub const NARRATIVE_UNAVAILABLE: &str = "Analysis unavailable.";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAnalysis {
    pub metrics: ScheduleMetrics,
    /// Generated summary, or [`NARRATIVE_UNAVAILABLE`].
    pub narrative: String,
    /// Staffing gaps passed through from the assigner.
    pub warnings: Vec<StaffingGap>,
}

impl ScheduleAnalysis {
    /// Whether the narrative came from the collaborator.
    pub fn has_narrative(&self) -> bool {
        self.narrative != NARRATIVE_UNAVAILABLE
    }
}

/// Computes metrics and requests a narrative.
#[derive(Debug, Clone)]
pub struct ScheduleAnalyzer<G = ChatNarrativeGenerator> {
    narrator: Option<G>,
    timeout: Duration,
}

impl Default for ScheduleAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl ScheduleAnalyzer {
    /// Creates an analyzer with no narrative collaborator.
    pub fn new(timeout: Duration) -> Self {
        Self {
            narrator: None,
            timeout,
        }
    }

    /// Creates an analyzer from configuration.
    ///
    /// A disabled or unbuildable narrative client leaves the analyzer
    /// metrics-only.
    pub fn from_config(config: &NarrativeConfig) -> Self {
        let mut analyzer = Self::new(config.timeout());
        if !config.is_configured() {
            return analyzer;
        }
        match ChatNarrativeGenerator::from_config(config) {
            Ok(generator) => analyzer.narrator = Some(generator),
            Err(error) => {
                tracing::warn!(%error, "failed to build narrative client; narratives disabled");
            }
        }
        analyzer
    }
}

impl<G: NarrativeGenerator> ScheduleAnalyzer<G> {
    /// Replaces the narrative collaborator.
    pub fn with_narrator<H: NarrativeGenerator>(self, narrator: H) -> ScheduleAnalyzer<H> {
        ScheduleAnalyzer {
            narrator: Some(narrator),
            timeout: self.timeout,
        }
    }

    /// Sets the narrative timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Narrative timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Analyzes a finished schedule.
    pub async fn analyze(&self, schedule: &RosterSchedule) -> ScheduleAnalysis {
        let metrics = ScheduleMetrics::calculate(schedule);
        let narrative = self.narrate(schedule, &metrics).await;
        ScheduleAnalysis {
            metrics,
            narrative,
            warnings: schedule.gaps.clone(),
        }
    }

    async fn narrate(&self, schedule: &RosterSchedule, metrics: &ScheduleMetrics) -> String {
        let Some(narrator) = &self.narrator else {
            return NARRATIVE_UNAVAILABLE.to_string();
        };

        let request = NarrativeRequest::new(schedule, metrics);
        let error = match tokio::time::timeout(self.timeout, narrator.generate(&request)).await {
            Ok(Ok(text)) => return text,
            Ok(Err(error)) => error,
            Err(_) => NarrativeError::Timeout {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            },
        };
        tracing::warn!(%error, "narrative unavailable; returning metrics only");
        NARRATIVE_UNAVAILABLE.to_string()
    }
}
