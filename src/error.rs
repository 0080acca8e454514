//! Error types.
//!
//! Fatal errors abort a run and reach the caller. Non-fatal conditions
//! (staffing gaps, a missing narrative) are never errors; they travel
//! alongside successful results.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while loading employees or zones.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source has no data for the organization.
    #[error("Unknown organization: {organization_id}")]
    UnknownOrganization { organization_id: String },

    /// Reading the backing store failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored data could not be decoded.
    #[error("Malformed data in {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that abort a scheduling run.
#[derive(Debug, Error)]
pub enum RosterError {
    /// A loader failed; no schedule is produced.
    #[error("Data unavailable: failed to load {what} for organization {organization_id}")]
    DataUnavailable {
        what: &'static str,
        organization_id: String,
        #[source]
        source: SourceError,
    },

    /// Loaded data repeats an employee or zone ID.
    #[error("Invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
}

/// Errors from the narrative collaborator. Always absorbed by the analyzer.
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// The call did not finish within the configured timeout.
    #[error("Narrative generation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Transport or HTTP status failure.
    #[error("Narrative request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The collaborator answered without usable text.
    #[error("Narrative response contained no text")]
    EmptyResponse,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    }
}
