use std::time::Duration;

use async_trait::async_trait;
use pod_types::ServiceId;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::{ApiError, Record, RegistrationSource, ServiceClient};

const REGISTRATIONS_PATH: &str = "/registrations/";

/// Client for the registration hub.
#[derive(Debug, Clone)]
pub struct HubApiClient {
    client: ServiceClient,
}

impl HubApiClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            client: ServiceClient::new(ServiceId::Hub, base_url, token, timeout)?,
        })
    }
}

#[async_trait]
impl RegistrationSource for HubApiClient {
    /// `GET {base}/registrations/?{filter_field}={contact_id}`.
    ///
    /// Only the first page of results is read.
    async fn get_registrations(&self, filter_field: &str, contact_id: &str) -> Result<Vec<Record>, ApiError> {
        let builder = self
            .client
            .request(Method::GET, REGISTRATIONS_PATH)
            .query(&[(filter_field, contact_id)]);
        let (status, text) = self.client.send(builder).await?;
        let payload = self.client.parse_success(status, &text)?;
        let registrations = registrations_from_payload(payload)?;
        debug!(count = registrations.len(), filter_field, "fetched registrations");
        Ok(registrations)
    }
}

/// Extract registration records from either a paginated `{"results": [...]}`
/// envelope or a bare JSON array.
fn registrations_from_payload(payload: Value) -> Result<Vec<Record>, ApiError> {
    let invalid = |reason: &str| ApiError::InvalidPayload {
        service: ServiceId::Hub,
        reason: reason.to_string(),
    };

    let results = match payload {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("results") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(invalid("'results' is not a list")),
            None => return Err(invalid("missing 'results' list")),
        },
        _ => return Err(invalid("expected an object with 'results' or a list")),
    };

    results
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(invalid("registration is not an object")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_paginated_envelope() {
        let payload = json!({"count": 1, "next": null, "results": [{"id": "r1", "data": {"mama_name": "Jane"}}]});
        let records = registrations_from_payload(payload).expect("parse envelope");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("id"), Some(&json!("r1")));
    }

    #[test]
    fn reads_bare_list() {
        let records = registrations_from_payload(json!([{"id": "r1"}, {"id": "r2"}])).expect("parse list");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn rejects_non_object_records_and_missing_results() {
        assert!(registrations_from_payload(json!({"results": [1, 2]})).is_err());
        assert!(registrations_from_payload(json!({"detail": "ok"})).is_err());
        assert!(registrations_from_payload(json!("nope")).is_err());
    }
}
