use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use pod_api::{ApiError, HubApiClient, IdentitySource, IdentityStoreApiClient, RegistrationSource};
use pod_types::ServiceId;
use serde_json::{Value, json};

const HUB_TOKEN: &str = "hub-token";
const IDS_TOKEN: &str = "ids-token";
const TIMEOUT: Duration = Duration::from_secs(5);

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let address = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}/api/v1", address)
}

fn authorized(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Token {}", token))
}

async fn registrations(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if !authorized(&headers, HUB_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Invalid token."})));
    }
    let results: Vec<Value> = params
        .get("mother_id")
        .map(|mother_id| vec![json!({"mother_id": mother_id, "data": {"mama_name": "Jane"}})])
        .unwrap_or_default();
    (StatusCode::OK, Json(json!({"count": results.len(), "next": null, "results": results})))
}

async fn identity(headers: HeaderMap, Path(identity_id): Path<String>) -> impl IntoResponse {
    if !authorized(&headers, IDS_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Invalid token."})));
    }
    match identity_id.as_str() {
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "boom"}))),
        "known" => (
            StatusCode::OK,
            Json(json!({"id": "known", "details": {"preferred_language": "eng_ZA"}})),
        ),
        _ => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))),
    }
}

fn router() -> Router {
    Router::new()
        .route("/api/v1/registrations/", get(registrations))
        .route("/api/v1/identities/{identity_id}/", get(identity))
        .route("/api/v1/garbage/registrations/", get(|| async { "<html>not json</html>" }))
}

#[tokio::test]
async fn hub_sends_token_and_contact_filter() {
    let base_url = serve(router()).await;
    let hub = HubApiClient::new(&base_url, HUB_TOKEN, TIMEOUT).expect("build hub client");

    let registrations = hub.get_registrations("mother_id", "abc-123").await.expect("list registrations");

    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].get("mother_id"), Some(&json!("abc-123")));
    assert_eq!(registrations[0].get("data"), Some(&json!({"mama_name": "Jane"})));
}

#[tokio::test]
async fn hub_filter_uses_configured_field_name() {
    let base_url = serve(router()).await;
    let hub = HubApiClient::new(&base_url, HUB_TOKEN, TIMEOUT).expect("build hub client");

    let registrations = hub.get_registrations("registrant_id", "abc-123").await.expect("list registrations");

    assert!(registrations.is_empty(), "server only matches mother_id: {:?}", registrations);
}

#[tokio::test]
async fn hub_rejected_token_is_an_auth_failure() {
    let base_url = serve(router()).await;
    let hub = HubApiClient::new(&base_url, "wrong", TIMEOUT).expect("build hub client");

    let error = hub.get_registrations("mother_id", "abc-123").await.expect_err("401");

    assert!(error.is_auth_failure(), "{error:?}");
    assert_eq!(error.service(), ServiceId::Hub);
}

#[tokio::test]
async fn hub_malformed_body_is_invalid_payload() {
    let base_url = serve(router()).await;
    let hub = HubApiClient::new(&format!("{}/garbage", base_url), HUB_TOKEN, TIMEOUT).expect("build hub client");

    let error = hub.get_registrations("mother_id", "abc-123").await.expect_err("html body");

    assert!(matches!(error, ApiError::InvalidPayload { service: ServiceId::Hub, .. }), "{error:?}");
}

#[tokio::test]
async fn identity_is_returned_when_found() {
    let base_url = serve(router()).await;
    let ids = IdentityStoreApiClient::new(&base_url, IDS_TOKEN, TIMEOUT).expect("build identity client");

    let identity = ids.get_identity("known").await.expect("fetch identity").expect("identity exists");

    assert_eq!(identity.get("details"), Some(&json!({"preferred_language": "eng_ZA"})));
}

#[tokio::test]
async fn missing_identity_is_none() {
    let base_url = serve(router()).await;
    let ids = IdentityStoreApiClient::new(&base_url, IDS_TOKEN, TIMEOUT).expect("build identity client");

    let identity = ids.get_identity("someone-else").await.expect("404 is not an error");

    assert!(identity.is_none());
}

#[tokio::test]
async fn identity_server_error_propagates() {
    let base_url = serve(router()).await;
    let ids = IdentityStoreApiClient::new(&base_url, IDS_TOKEN, TIMEOUT).expect("build identity client");

    let error = ids.get_identity("broken").await.expect_err("500");

    match error {
        ApiError::Status { service, status, body } => {
            assert_eq!(service, ServiceId::IdentityStore);
            assert_eq!(status, 500);
            assert!(body.contains("boom"), "{body}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    drop(listener);

    let hub = HubApiClient::new(&format!("http://{}", address), HUB_TOKEN, TIMEOUT).expect("build hub client");
    let error = hub.get_registrations("mother_id", "abc-123").await.expect_err("connection refused");

    assert!(matches!(error, ApiError::Network { service: ServiceId::Hub, .. }), "{error:?}");
}

#[tokio::test]
async fn https_services_reach_the_network() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    drop(listener);

    let hub = HubApiClient::new(&format!("https://{}", address), HUB_TOKEN, TIMEOUT).expect("build hub client");
    let error = hub.get_registrations("mother_id", "abc-123").await.expect_err("connection refused");

    let ApiError::Network { service, source } = &error else {
        panic!("unexpected error: {error:?}");
    };
    assert_eq!(*service, ServiceId::Hub);
    assert!(source.is_connect(), "{source:?}");

    let mut cause: Option<&dyn std::error::Error> = Some(source as &dyn std::error::Error);
    while let Some(current) = cause {
        assert!(!current.to_string().contains("scheme is not http"), "no TLS support: {current}");
        cause = current.source();
    }
}
