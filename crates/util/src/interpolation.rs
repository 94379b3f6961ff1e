//! `${env:NAME}` and `${secret:NAME}` expansion for configuration values.
//!
//! Pod configuration usually carries service tokens. Rather than storing
//! them inline, a config may reference an environment variable or a secret
//! held in the OS keychain:
//!
//! ```text
//! "token": "${env:HUB_TOKEN}"
//! "token": "${secret:identity-store-token}"
//! ```
//!
//! Set `CASEPRO_PODS_SECRETS_BACKEND=env` to resolve secrets from the process
//! environment instead of the keychain (useful for CI and containers).

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

static SERVICE: &str = "casepro-pods";
/// Environment variable used to select the secret resolution backend.
pub const SECRETS_BACKEND_ENV_VAR: &str = "CASEPRO_PODS_SECRETS_BACKEND";

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{env:([\w+_-]*)}").expect("env placeholder regex should compile"));
static SECRET_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{secret:([\w+_-]*)}").expect("secret placeholder regex should compile"));

/// Secret resolution backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretsBackend {
    /// Resolve `${secret:NAME}` values via OS keychain (`keyring-rs`).
    Keychain,
    /// Resolve `${secret:NAME}` values from process environment variable `NAME`.
    Environment,
}

impl SecretsBackend {
    fn from_env_var(raw: Option<String>) -> Self {
        match raw.unwrap_or_default().trim().to_ascii_lowercase().as_str() {
            "env" => Self::Environment,
            _ => Self::Keychain,
        }
    }
}

/// Determine the currently configured secrets backend.
pub fn secrets_backend() -> SecretsBackend {
    SecretsBackend::from_env_var(std::env::var(SECRETS_BACKEND_ENV_VAR).ok())
}

/// Interpolate a string value, replacing `${env:NAME}` and `${secret:NAME}` patterns.
///
/// Values without placeholders are returned unchanged.
pub fn interpolate_string(value: &str) -> Result<String, InterpolationError> {
    let mut replacements = Vec::new();

    for cap in ENV_PLACEHOLDER.captures_iter(value) {
        let var_name = cap[1].to_string();
        let env_value = std::env::var(&var_name).map_err(|_| InterpolationError::MissingEnvVar { name: var_name.clone() })?;
        debug!("Interpolated env var: {} -> [REDACTED]", var_name);
        replacements.push((cap[0].to_string(), env_value));
    }

    for cap in SECRET_PLACEHOLDER.captures_iter(value) {
        let secret_name = cap[1].to_string();
        let secret_value = resolve_secret(&secret_name)?;
        debug!("Interpolated secret: {} -> [REDACTED]", secret_name);
        replacements.push((cap[0].to_string(), secret_value));
    }

    let mut result = value.to_string();
    for (placeholder, resolved) in replacements {
        result = result.replace(&placeholder, &resolved);
    }
    Ok(result)
}

/// Resolve a secret using the configured secrets backend.
pub fn resolve_secret(name: &str) -> Result<String, InterpolationError> {
    match secrets_backend() {
        SecretsBackend::Environment => std::env::var(name).map_err(|error| InterpolationError::MissingSecret {
            name: name.to_string(),
            error: error.to_string(),
        }),
        SecretsBackend::Keychain => {
            let entry = keyring::Entry::new(SERVICE, name).map_err(|e| InterpolationError::KeyringError {
                name: name.to_string(),
                error: e.to_string(),
            })?;

            entry.get_password().map_err(|e| InterpolationError::MissingSecret {
                name: name.to_string(),
                error: e.to_string(),
            })
        }
    }
}

/// Errors that can occur during interpolation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("Missing environment variable: {name}")]
    MissingEnvVar { name: String },

    #[error("Missing secret: {name} - {error}")]
    MissingSecret { name: String, error: String },

    #[error("Keyring error for {name}: {error}")]
    KeyringError { name: String, error: String },
}
