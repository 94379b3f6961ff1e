use pod_api::ApiError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by a pod while it is built or while it reads data.
///
/// A contact without a uuid is not an error (the pod returns empty content),
/// and neither is a field missing from every source (it reads "Unknown").
#[derive(Debug, Error)]
pub enum PodError {
    #[error("Case not found: {case_id}")]
    CaseNotFound { case_id: u64 },

    #[error("Case lookup failed: {reason}")]
    CaseStore { reason: String },

    #[error("Remote service error: {0}")]
    Remote(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Errors from registering or looking up pod descriptors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Pod already registered: {identifier}")]
    DuplicatePod { identifier: String },

    #[error("Unknown pod: {identifier}")]
    UnknownPod { identifier: String },
}
