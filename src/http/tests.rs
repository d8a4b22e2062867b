//! Tests for the HTTP client module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::session::Session;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, session: Session) -> ApiClient {
    let config = ClientConfig::builder().base_url(server.uri()).build();
    ApiClient::new(config, session).unwrap()
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", 1)
        .query("size", "10")
        .header("X-Request-Id", "abc123")
        .timeout(Duration::from_secs(10));

    assert_eq!(config.query.get("page"), Some(&"1".to_string()));
    assert_eq!(config.query.get("size"), Some(&"10".to_string()));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = ClientConfig::builder().page_size(0).build();
    assert!(ApiClient::new(config, Session::new()).is_err());
}

#[tokio::test]
async fn test_get_json_with_query_and_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(query_param("page", "2"))
        .and(query_param("size", "10"))
        .and(header("Authorization", "Bearer jwt-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 42})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Session::with_token("jwt-123"));
    let data: serde_json::Value = client
        .get_json("/feed", RequestConfig::new().query("page", 2).query("size", 10))
        .await
        .unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_anonymous_request_has_no_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Session::new());
    let response = client.get("/feed", RequestConfig::new()).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_error_body_message_kept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "Service Unavailable",
            "message": "Feed is temporarily unavailable",
            "timestamp": "2024-05-01T12:30:00Z"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Session::new());
    let err = client.get("/feed", RequestConfig::new()).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert_eq!(err.display_message(), Some("Feed is temporarily unavailable"));
}

#[tokio::test]
async fn test_error_body_without_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Session::new());
    let err = client.get("/feed", RequestConfig::new()).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, message: None }));
}

#[tokio::test]
async fn test_unauthorized_evicts_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Unauthorized",
            "message": "Invalid or expired token"
        })))
        .mount(&mock_server)
        .await;

    let session = Session::with_token("stale");
    let client = client_for(&mock_server, session.clone());
    let err = client.get("/feed", RequestConfig::new()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.display_message(), Some("Invalid or expired token"));
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn test_no_automatic_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Session::new());
    assert!(client.get("/feed", RequestConfig::new()).await.is_err());
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Session::new());
    let err = client
        .get("/slow", RequestConfig::new().timeout(Duration::from_millis(50)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Session::new());
    let err = client
        .get_json::<serde_json::Value>("/feed", RequestConfig::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_base_url_trailing_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .base_url(format!("{}/", mock_server.uri()))
        .build();
    let client = ApiClient::new(config, Session::new()).unwrap();
    let response = client.get("/feed", RequestConfig::new()).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_full_url_passthrough() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(ClientConfig::default(), Session::new()).unwrap();
    let response = client
        .get(&format!("{}/elsewhere", mock_server.uri()), RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[test]
fn test_debug_output() {
    let client = ApiClient::new(ClientConfig::default(), Session::with_token("t")).unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("ApiClient"));
    assert!(debug_str.contains("config"));
}
