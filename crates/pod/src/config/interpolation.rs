//! Placeholder expansion for service settings.

use pod_util::interpolate_string;
use tracing::debug;

use super::{ConfigError, RegistrationPodConfig, ServiceConfig};

/// Expand `${env:...}` and `${secret:...}` in every service URL and token.
pub fn interpolate_config(config: &mut RegistrationPodConfig) -> Result<(), ConfigError> {
    interpolate_service("hub", &mut config.hub)?;
    if let Some(identity_store) = config.identity_store.as_mut() {
        interpolate_service("identity_store", identity_store)?;
    }
    Ok(())
}

fn interpolate_service(name: &str, service: &mut ServiceConfig) -> Result<(), ConfigError> {
    service.url = interpolate_field(name, "url", &service.url)?;
    service.token = interpolate_field(name, "token", &service.token)?;
    debug!("Interpolated configuration for service: {}", name);
    Ok(())
}

fn interpolate_field(service: &str, field: &str, value: &str) -> Result<String, ConfigError> {
    interpolate_string(value).map_err(|source| ConfigError::Interpolation {
        field: format!("{}.{}", service, field),
        source,
    })
}
