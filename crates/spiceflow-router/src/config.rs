//! Router configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do when one pattern names the same parameter twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateParams {
    /// Fail the registration with [`InvalidPatternKind::DuplicateParam`](crate::InvalidPatternKind::DuplicateParam).
    #[default]
    Reject,
    /// Accept the pattern; the later occurrence's value is reported.
    LastWins,
}

/// Router configuration.
///
/// Deserializable so it can live inside an application's config file:
///
/// ```
/// use spiceflow_router::{DuplicateParams, RouterConfig};
///
/// let config = RouterConfig::from_json(r#"{"duplicate_params": "last_wins"}"#).unwrap();
/// assert_eq!(config.duplicate_params, DuplicateParams::LastWins);
/// assert!(config.head_falls_back_to_get);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Policy for repeated parameter names within one pattern.
    pub duplicate_params: DuplicateParams,
    /// Retry an unmatched `HEAD` request as `GET`.
    pub head_falls_back_to_get: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            duplicate_params: DuplicateParams::Reject,
            head_falls_back_to_get: true,
        }
    }
}

impl RouterConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicate parameter policy.
    #[must_use]
    pub fn duplicate_params(mut self, policy: DuplicateParams) -> Self {
        self.duplicate_params = policy;
        self
    }

    /// Enables or disables the `HEAD` to `GET` fallback.
    #[must_use]
    pub fn head_falls_back_to_get(mut self, enabled: bool) -> Self {
        self.head_falls_back_to_get = enabled;
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::new)
    }
}
