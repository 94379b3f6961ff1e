//! HTTP clients for the services backing the registration pod.
//!
//! This crate provides a thin client for each remote service:
//!
//! - [`HubApiClient`] lists registrations from the registration hub
//! - [`IdentityStoreApiClient`] fetches identities from the identity store
//!
//! Both are built on [`ServiceClient`], which owns the `reqwest::Client`,
//! validates the base URL, and attaches the `Authorization: Token ...`
//! header the services expect. The [`RegistrationSource`] and
//! [`IdentitySource`] traits are the seams the pod depends on, so hosts
//! and tests can swap in other implementations.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use pod_api::{HubApiClient, RegistrationSource};
//!
//! let hub = HubApiClient::new("https://hub.example.org/api/v1", "token", Duration::from_secs(30))?;
//! let registrations = hub.get_registrations("mother_id", "4d3c...").await?;
//! ```

use std::env;
use std::time::Duration;

use pod_types::ServiceId;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url, header};
use serde_json::Value;
use tracing::{debug, warn};

mod error;
mod hub;
mod identity;
mod source;

pub use error::ApiError;
pub use hub::HubApiClient;
pub use identity::IdentityStoreApiClient;
pub use source::{IdentitySource, Record, RegistrationSource};

/// Hostnames treated as local development hosts, where plain http is expected.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Maximum number of response body characters kept in error messages.
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Clone)]
/// Configured `reqwest::Client` bound to one remote service.
///
/// Requests are resolved relative to the base URL, so a base of
/// `https://hub.example.org/api/v1` and a path of `/registrations/` yield
/// `https://hub.example.org/api/v1/registrations/`.
pub struct ServiceClient {
    service: ServiceId,
    base_url: String,
    http: Client,
    user_agent: String,
}

impl ServiceClient {
    /// Build a client for `service` authenticated with `token`.
    pub fn new(service: ServiceId, base_url: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        validate_base_url(service, base_url)?;

        let mut default_headers = header::HeaderMap::new();
        let mut authorization = header::HeaderValue::from_str(&format!("Token {}", token.trim()))
            .map_err(|_| ApiError::InvalidToken { service })?;
        authorization.set_sensitive(true);
        default_headers.insert(header::AUTHORIZATION, authorization);
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::ClientBuild { service, source })?;

        Ok(Self {
            service,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            http,
            user_agent: format!("casepro-pods/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a `reqwest::RequestBuilder` for a method and service-relative path.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(service = %self.service, %url, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
    }

    /// Send a request and return the status with the raw body text.
    ///
    /// Network failures become [`ApiError::Network`]; the status is not
    /// inspected here so callers can treat specific codes (such as 404)
    /// as data rather than failure.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let response = builder.send().await.map_err(|source| ApiError::Network {
            service: self.service,
            source,
        })?;
        let status = response.status();
        let text = response.text().await.map_err(|source| ApiError::Network {
            service: self.service,
            source,
        })?;
        debug!(service = %self.service, status = status.as_u16(), bytes = text.len(), "received response");
        Ok((status, text))
    }

    /// Turn a non-success status into [`ApiError::Status`] and parse the body as JSON.
    pub(crate) fn parse_success(&self, status: StatusCode, text: &str) -> Result<Value, ApiError> {
        if !status.is_success() {
            return Err(ApiError::Status {
                service: self.service,
                status: status.as_u16(),
                body: summarize_body(text),
            });
        }

        serde_json::from_str::<Value>(text).map_err(|error| ApiError::InvalidPayload {
            service: self.service,
            reason: format!("invalid JSON: {}", error),
        })
    }
}

/// Validate that a base URL is acceptable for use by a client.
///
/// Rules:
/// - the URL must parse and include a host
/// - the scheme must be `http` or `https`
/// - plain `http` to a non-localhost host is allowed but logged
pub fn validate_base_url(service: ServiceId, base: &str) -> Result<(), ApiError> {
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        service,
        url: base.to_string(),
        reason,
    };

    let parsed = Url::parse(base.trim()).map_err(|error| invalid(error.to_string()))?;
    let host_name = parsed.host_str().ok_or_else(|| invalid("URL must include a host".into()))?;

    match parsed.scheme() {
        "https" => Ok(()),
        "http" => {
            let is_local = LOCALHOST_DOMAINS
                .iter()
                .any(|&allowed| host_name.eq_ignore_ascii_case(allowed));
            if !is_local {
                warn!(%service, host = host_name, "service configured with plain http");
            }
            Ok(())
        }
        other => Err(invalid(format!("unsupported scheme '{}://' (expected http or https)", other))),
    }
}

fn summarize_body(text: &str) -> String {
    let redacted = pod_util::redact_sensitive(text.trim());
    if redacted.chars().count() <= ERROR_BODY_LIMIT {
        return redacted;
    }
    let truncated: String = redacted.chars().take(ERROR_BODY_LIMIT.saturating_sub(3)).collect();
    format!("{}...", truncated.trim_end())
}
