//! Natural-language schedule summaries.
//!
//! The narrative is produced by an external text-generation service.
//! This module owns the structured request handed to it and a client
//! for OpenAI-compatible chat completion endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;

use super::ScheduleMetrics;
use crate::config::NarrativeConfig;
use crate::error::NarrativeError;
use crate::models::RosterSchedule;

/// Gap lines included in a prompt; the rest are summarized as a count.
const MAX_GAP_LINES: usize = 20;

const SYSTEM_PROMPT: &str = "You are a workforce scheduling assistant. \
Summarize the staffing schedule for a manager in a short paragraph: \
overall coverage, workload balance, and any staffing gaps that need attention.";

/// Structured summary sent to the narrative collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    /// First scheduled date, if any.
    pub period_start: Option<NaiveDate>,
    /// Last scheduled date, if any.
    pub period_end: Option<NaiveDate>,
    pub total_shifts: usize,
    pub total_hours: f64,
    pub fill_rate: f64,
    pub shifts_per_role: BTreeMap<String, usize>,
    pub shifts_per_zone: BTreeMap<String, usize>,
    /// Employee load range `(min, max)` among scheduled employees.
    pub employee_load: Option<(usize, usize)>,
    /// Staffing gap descriptions.
    pub gaps: Vec<String>,
}

impl NarrativeRequest {
    /// Builds a request from a schedule and its metrics.
    pub fn new(schedule: &RosterSchedule, metrics: &ScheduleMetrics) -> Self {
        let dates = schedule.assignments.iter().map(|a| a.shift_date);
        Self {
            period_start: dates.clone().min(),
            period_end: dates.max(),
            total_shifts: metrics.total_shifts,
            total_hours: metrics.total_hours,
            fill_rate: metrics.fill_rate,
            shifts_per_role: metrics.shifts_per_role.clone(),
            shifts_per_zone: metrics.shifts_per_zone.clone(),
            employee_load: metrics.employee_load_range(),
            gaps: schedule.gaps.iter().map(|g| g.message()).collect(),
        }
    }

    /// Renders the request as a plain-text prompt, one fact per line.
    pub fn to_prompt(&self) -> String {
        let mut lines = Vec::new();
        lines.push(match (self.period_start, self.period_end) {
            (Some(start), Some(end)) => format!("Period: {start} to {end}"),
            _ => "Period: no shifts scheduled".to_string(),
        });
        lines.push(format!(
            "Total shifts: {} ({:.1} hours)",
            self.total_shifts, self.total_hours
        ));
        lines.push(format!("Coverage: {:.0}%", self.fill_rate * 100.0));
        if let Some((min, max)) = self.employee_load {
            lines.push(format!("Shifts per employee: {min} to {max}"));
        }

        lines.push("Shifts by role:".to_string());
        lines.extend(
            self.shifts_per_role
                .iter()
                .map(|(role, count)| format!("- {role}: {count}")),
        );
        lines.push("Shifts by zone:".to_string());
        lines.extend(
            self.shifts_per_zone
                .iter()
                .map(|(zone, count)| format!("- {zone}: {count}")),
        );

        if self.gaps.is_empty() {
            lines.push("Staffing gaps: none".to_string());
        } else {
            lines.push(format!("Staffing gaps ({}):", self.gaps.len()));
            lines.extend(
                self.gaps
                    .iter()
                    .take(MAX_GAP_LINES)
                    .map(|gap| format!("- {gap}")),
            );
            if self.gaps.len() > MAX_GAP_LINES {
                lines.push(format!("- ... and {} more", self.gaps.len() - MAX_GAP_LINES));
            }
        }

        let mut prompt = lines.join("\n");
        prompt.push('\n');
        prompt
    }
}

/// External text-generation collaborator.
pub trait NarrativeGenerator: Send + Sync {
    /// Produces a narrative for the summary.
    fn generate(
        &self,
        request: &NarrativeRequest,
    ) -> impl Future<Output = Result<String, NarrativeError>> + Send;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Result<String, NarrativeError> {
        self.choices
            .into_iter()
            .filter_map(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
            .ok_or(NarrativeError::EmptyResponse)
    }
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatNarrativeGenerator {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatNarrativeGenerator {
    /// Builds a client from configuration.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self, NarrativeError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("u-roster/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        }
    }
}

impl NarrativeGenerator for ChatNarrativeGenerator {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeError> {
        let prompt = request.to_prompt();
        let mut call = self.http.post(&self.endpoint).json(&self.body(&prompt));
        if !self.api_key.is_empty() {
            call = call.bearer_auth(&self.api_key);
        }

        let response: ChatResponse = call.send().await?.error_for_status()?.json().await?;
        response.into_text()
    }
}
