use crate::error::{ConfigError, ConfigurationError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LINKS_KEY: &str = "_links";
pub const DEFAULT_EMBEDDED_KEY: &str = "_embedded";

/// What to do with an `_embedded` entry the representer does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownEmbeddedPolicy {
    /// Drop it silently.
    Ignore,
    /// Drop it and log a warning.
    #[default]
    Warn,
    /// Fail the parse.
    Reject,
}

/// Per-representer document options.
///
/// ```yaml
/// links_key: _links
/// embedded_key: _embedded
/// unknown_embedded: reject
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HalOptions {
    pub links_key: String,
    pub embedded_key: String,
    pub unknown_embedded: UnknownEmbeddedPolicy,
}

impl Default for HalOptions {
    fn default() -> Self {
        HalOptions {
            links_key: DEFAULT_LINKS_KEY.to_string(),
            embedded_key: DEFAULT_EMBEDDED_KEY.to_string(),
            unknown_embedded: UnknownEmbeddedPolicy::default(),
        }
    }
}

impl HalOptions {
    /// Plain links mode: links live under `links` rather than `_links`.
    pub fn links_only() -> Self {
        HalOptions {
            links_key: "links".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_unknown_embedded(mut self, policy: UnknownEmbeddedPolicy) -> Self {
        self.unknown_embedded = policy;
        self
    }

    /// Checks that both keys are set and distinct.
    ///
    /// # Errors
    /// Returns a `ConfigurationError` if a key is empty or the two keys are equal.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.links_key.is_empty() {
            return Err(ConfigurationError::EmptyKey { option: "links_key" });
        }
        if self.embedded_key.is_empty() {
            return Err(ConfigurationError::EmptyKey {
                option: "embedded_key",
            });
        }
        if self.links_key == self.embedded_key {
            return Err(ConfigurationError::ConflictingKeys {
                key: self.links_key.clone(),
            });
        }
        Ok(())
    }

    /// # Errors
    /// Returns a `ConfigError` if the text is not valid JSON or has unknown keys.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// # Errors
    /// Returns a `ConfigError` if the text is not valid YAML or has unknown keys.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }
}
