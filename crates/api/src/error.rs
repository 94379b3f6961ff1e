//! Error types for remote service calls.

use pod_types::ServiceId;
use thiserror::Error;

/// Failure talking to the hub or the identity store.
///
/// None of these are retried; the pod surfaces them to the host, which shows
/// a generic failure state in the panel.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid {service} base URL '{url}': {reason}")]
    InvalidBaseUrl {
        service: ServiceId,
        url: String,
        reason: String,
    },

    #[error("Invalid {service} token: value cannot be sent as an Authorization header")]
    InvalidToken { service: ServiceId },

    #[error("Failed to build {service} HTTP client: {source}")]
    ClientBuild {
        service: ServiceId,
        #[source]
        source: reqwest::Error,
    },

    #[error("Network error calling {service}: {source}")]
    Network {
        service: ServiceId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: ServiceId,
        status: u16,
        body: String,
    },

    #[error("Invalid {service} response: {reason}")]
    InvalidPayload { service: ServiceId, reason: String },
}

impl ApiError {
    /// The service that produced this error.
    pub fn service(&self) -> ServiceId {
        match self {
            Self::InvalidBaseUrl { service, .. }
            | Self::InvalidToken { service }
            | Self::ClientBuild { service, .. }
            | Self::Network { service, .. }
            | Self::Status { service, .. }
            | Self::InvalidPayload { service, .. } => *service,
        }
    }

    /// True for 401/403 responses.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}
