//! Layered configuration using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ROSTER_*` prefix, `__` as separator)
//! 2. `roster.toml` in the working directory
//! 3. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `ROSTER_ASSIGNMENT__TIE_BREAK` -> `assignment.tie_break`,
//! `ROSTER_NARRATIVE__TIMEOUT_MS` -> `narrative.timeout_ms`, etc.
//!
//! # Example file
//!
//! ```toml
//! [assignment]
//! tie_break = "employee_id"
//! overlap = "reject"
//!
//! [narrative]
//! enabled = true
//! endpoint = "https://api.openai.com/v1/chat/completions"
//! model = "gpt-4o-mini"
//! timeout_ms = 8000
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::scheduler::AssignerOptions;

const fn default_timeout_ms() -> u64 {
    10_000
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub assignment: AssignerOptions,
    #[serde(default)]
    pub narrative: NarrativeConfig,
}

/// Settings for the optional narrative collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NarrativeConfig {
    /// Whether to request a narrative at all.
    #[serde(default)]
    pub enabled: bool,

    /// OpenAI-compatible chat completions URL.
    #[serde(default)]
    pub endpoint: String,

    /// Model name sent with each request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token. Empty means no `Authorization` header.
    #[serde(default)]
    pub api_key: String,

    /// Upper bound for one narrative call.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            model: default_model(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl NarrativeConfig {
    /// Enabled and pointing somewhere.
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.endpoint.is_empty()
    }

    /// Timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl RosterConfig {
    const FILE_NAME: &'static str = "roster.toml";
    const ENV_PREFIX: &'static str = "ROSTER_";

    /// Load configuration from defaults, `roster.toml`, and environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration using an explicit TOML file instead of
    /// `roster.toml`. Environment variables still win.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__"));
        Self::extract(figment)
    }

    /// Build the figment provider chain.
    ///
    /// Public so callers can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let local_path = Path::new(Self::FILE_NAME);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(Self::ENV_PREFIX).split("__"))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.narrative.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "narrative.timeout_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.narrative.enabled && self.narrative.endpoint.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "narrative.endpoint".into(),
                reason: "required when narrative.enabled = true".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{OverlapPolicy, TieBreak};

    #[test]
    fn test_default_config() {
        let config = RosterConfig::default();
        assert_eq!(config.assignment.tie_break, TieBreak::InputOrder);
        assert_eq!(config.assignment.overlap, OverlapPolicy::Permit);
        assert!(!config.narrative.is_configured());
        assert_eq!(config.narrative.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = RosterConfig::default();
        config.narrative.timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "narrative.timeout_ms"
        ));
    }

    #[test]
    fn test_enabled_without_endpoint_rejected() {
        let mut config = RosterConfig::default();
        config.narrative.enabled = true;
        assert!(config.validate().is_err());
    }
}
