//! Configuration validation for the registration pod.

use pod_api::validate_base_url;
use pod_types::ServiceId;
use thiserror::Error;
use tracing::debug;

use super::{RegistrationPodConfig, ServiceConfig};

/// Validate the entire pod configuration.
pub fn validate_config(config: &RegistrationPodConfig) -> Result<(), ValidationError> {
    validate_service("hub", ServiceId::Hub, &config.hub)?;
    if let Some(identity_store) = &config.identity_store {
        validate_service("identity_store", ServiceId::IdentityStore, identity_store)?;
    }

    if config.contact_id_fieldname.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: "contact_id_fieldname".into(),
        });
    }

    for (index, entry) in config.field_mapping.iter().enumerate() {
        if entry.field.trim().is_empty() {
            return Err(ValidationError::InvalidMappingEntry {
                index,
                reason: "'field' cannot be empty".into(),
            });
        }
        if entry.field_name.trim().is_empty() {
            return Err(ValidationError::InvalidMappingEntry {
                index,
                reason: format!("'field_name' for '{}' cannot be empty", entry.field),
            });
        }
    }

    if config.timeout_secs == 0 {
        return Err(ValidationError::InvalidTimeout);
    }

    debug!(fields = config.field_mapping.len(), "Validated registration pod configuration");
    Ok(())
}

fn validate_service(name: &str, service_id: ServiceId, service: &ServiceConfig) -> Result<(), ValidationError> {
    if service.url.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: format!("{}.url", name),
        });
    }
    if service.token.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: format!("{}.token", name),
        });
    }
    validate_base_url(service_id, &service.url).map_err(|error| ValidationError::InvalidServiceUrl {
        field: format!("{}.url", name),
        reason: error.to_string(),
    })
}

/// Errors that can occur during validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field '{field}'")]
    EmptyField { field: String },

    #[error("Invalid URL in '{field}': {reason}")]
    InvalidServiceUrl { field: String, reason: String },

    #[error("Invalid field_mapping entry {index}: {reason}")]
    InvalidMappingEntry { index: usize, reason: String },

    #[error("timeout_secs must be greater than zero")]
    InvalidTimeout,
}
