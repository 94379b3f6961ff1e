use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use pod_types::ServiceId;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::{ApiError, IdentitySource, Record, ServiceClient};

/// Characters left unescaped in the identity path segment (uuids pass through unchanged).
const IDENTITY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Client for the identity store.
#[derive(Debug, Clone)]
pub struct IdentityStoreApiClient {
    client: ServiceClient,
}

impl IdentityStoreApiClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            client: ServiceClient::new(ServiceId::IdentityStore, base_url, token, timeout)?,
        })
    }
}

#[async_trait]
impl IdentitySource for IdentityStoreApiClient {
    /// `GET {base}/identities/{identity_id}/`; a 404 maps to `Ok(None)`.
    async fn get_identity(&self, identity_id: &str) -> Result<Option<Record>, ApiError> {
        let path = format!("/identities/{}/", utf8_percent_encode(identity_id, IDENTITY_SEGMENT));
        let (status, text) = self.client.send(self.client.request(Method::GET, &path)).await?;
        if status == StatusCode::NOT_FOUND {
            debug!(identity_id, "identity not found");
            return Ok(None);
        }

        match self.client.parse_success(status, &text)? {
            Value::Object(identity) => Ok(Some(identity)),
            _ => Err(ApiError::InvalidPayload {
                service: ServiceId::IdentityStore,
                reason: "identity is not an object".into(),
            }),
        }
    }
}
