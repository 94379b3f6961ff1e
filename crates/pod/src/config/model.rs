//! Data models for pod configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use pod_types::MappingEntry;
use pod_util::InterpolationError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ValidationError;

/// Request timeout used when `timeout_secs` is omitted.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the registration pod.
///
/// ```json
/// {
///   "hub": {"url": "https://hub.example.org/api/v1", "token": "${env:HUB_TOKEN}"},
///   "identity_store": {"url": "https://ids.example.org/api/v1", "token": "${secret:ids-token}"},
///   "contact_id_fieldname": "mother_id",
///   "field_mapping": [{"field": "mama_name", "field_name": "Mother Name"}]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RegistrationPodConfig {
    /// Registration hub the registrations are listed from.
    pub hub: ServiceConfig,

    /// Identity store consulted before registrations. When omitted, identity
    /// details are not part of the lookup.
    #[serde(default)]
    pub identity_store: Option<ServiceConfig>,

    /// Field used to filter registrations by contact, for example `mother_id`.
    pub contact_id_fieldname: String,

    /// Fields to display, in display order.
    pub field_mapping: Vec<MappingEntry>,

    /// HTTP timeout for each remote call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RegistrationPodConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Base URL and token for one remote service.
#[derive(Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Base URL of the service API, for example `https://hub.example.org/api/v1`.
    pub url: String,
    /// Authentication token. Supports `${env:NAME}` and `${secret:NAME}`.
    pub token: String,
}

impl ServiceConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Errors raised while loading pod configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse pod configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to interpolate '{field}': {source}")]
    Interpolation {
        field: String,
        #[source]
        source: InterpolationError,
    },

    #[error("Invalid pod configuration: {0}")]
    Validation(#[from] ValidationError),
}
