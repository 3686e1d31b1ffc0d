//! Tests for the HTTP module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use reqwest::StatusCode;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .no_pacing()
        .build();
    HttpClient::new(&config).unwrap()
}

// ============================================================================
// QueryParams Tests
// ============================================================================

#[test]
fn test_query_params_builder() {
    let query = QueryParams::new()
        .param("page", 1)
        .param("per_page", 20)
        .param_opt("category", Some("identity"))
        .param_opt("state", None)
        .param_opt("search", Some(""));

    assert_eq!(query.describe(), "category=identity&page=1&per_page=20");
}

#[test]
fn test_query_params_extend_overrides() {
    let mut base = QueryParams::new().param("page", 1).param("category", "identity");
    base.extend(&QueryParams::new().param("page", 4));

    assert_eq!(base.describe(), "category=identity&page=4");
}

#[test]
fn test_query_params_from_iter_and_order() {
    let query: QueryParams = [("z", "1"), ("a", "2")].into_iter().collect();
    assert_eq!(query.describe(), "a=2&z=1");
}

#[test]
fn test_query_params_describe_hides_key() {
    let query = QueryParams::new()
        .param(API_KEY_PARAM, "nga_secret")
        .param("q", "NIN");
    let described = query.describe();
    assert_eq!(described, "api_key=***&q=NIN");
}

// ============================================================================
// HttpClient Tests
// ============================================================================

#[test]
fn test_build_url() {
    let config = ClientConfig::builder()
        .base_url("https://api.example.com/api:public/")
        .build();
    let client = HttpClient::new(&config).unwrap();

    assert_eq!(
        client.build_url("/fees"),
        "https://api.example.com/api:public/fees"
    );
    assert_eq!(
        client.build_url("fees/search"),
        "https://api.example.com/api:public/fees/search"
    );
    assert_eq!(
        client.build_url("https://other.example.com/x"),
        "https://other.example.com/x"
    );
}

#[test]
fn test_http_client_debug() {
    let config = ClientConfig::builder().base_url("http://localhost").build();
    let client = HttpClient::new(&config).unwrap();
    let debug = format!("{client:?}");
    assert!(debug.contains("HttpClient"));
    assert!(debug.contains("http://localhost"));
}

#[tokio::test]
async fn test_get_sends_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fees"))
        .and(query_param("page", "2"))
        .and(query_param("api_key", "nga_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = QueryParams::new().param("page", 2).param(API_KEY_PARAM, "nga_test");
    let response = client.get("fees", &query).await.unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Some(json!({"items": []})));
}

#[tokio::test]
async fn test_get_reads_json_body_on_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fees/99999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Fee not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.get("fees/99999", &QueryParams::new()).await.unwrap();

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), Some("Fee not found"));
}

#[tokio::test]
async fn test_get_non_json_body_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.get("docs", &QueryParams::new()).await.unwrap();

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.body.is_none());
}

#[tokio::test]
async fn test_post_json_sends_body_and_accept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api_key/generate"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({"user_email": "user@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "api_key": "nga_new"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .post_json("api_key/generate", &json!({"user_email": "user@example.com"}))
        .await
        .unwrap();

    assert!(response.status.is_success());
    assert_eq!(response.body.unwrap()["api_key"], "nga_new");
}

#[tokio::test]
async fn test_connection_error_is_http_error() {
    let config = ClientConfig::builder()
        .base_url("http://127.0.0.1:1")
        .build();
    let client = HttpClient::new(&config).unwrap();
    let err = client.get("fees", &QueryParams::new()).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

// ============================================================================
// ApiOutcome Tests
// ============================================================================

#[test]
fn test_application_code_wins_over_success_status() {
    let raw = RawResponse::new(
        StatusCode::OK,
        Some(json!({"code": "ERROR_CODE_ACCESS_DENIED", "message": "Invalid API key"})),
    );
    let outcome = ApiOutcome::classify(raw, "ERROR_CODE");
    assert_eq!(
        outcome,
        ApiOutcome::Application {
            code: "ERROR_CODE_ACCESS_DENIED".to_string(),
            message: "Invalid API key".to_string(),
        }
    );
}

#[test]
fn test_application_code_wins_over_error_status() {
    let raw = RawResponse::new(
        StatusCode::UNAUTHORIZED,
        Some(json!({"code": "ERROR_CODE_UNAUTHORIZED", "message": "Missing key"})),
    );
    let err = ApiOutcome::classify(raw, "ERROR_CODE")
        .into_result()
        .unwrap_err();
    assert_eq!(err.to_string(), "ERROR_CODE_UNAUTHORIZED: Missing key");
}

#[test]
fn test_application_code_without_message() {
    let raw = RawResponse::new(StatusCode::OK, Some(json!({"code": "ERROR_CODE_X"})));
    let err = ApiOutcome::classify(raw, "ERROR_CODE")
        .into_result()
        .unwrap_err();
    assert_eq!(err.to_string(), "ERROR_CODE_X: Unknown API error");
}

#[test_case("ERROR_CODE", true ; "exact prefix")]
#[test_case("ERROR_CODE_NOT_FOUND", true ; "longer code")]
#[test_case("ERR", false ; "shorter than prefix")]
#[test_case("error_code_bad", false ; "case sensitive")]
#[test_case("SOME_ERROR_CODE", false ; "prefix not at start")]
fn test_error_code_prefix_match(code: &str, is_application: bool) {
    let raw = RawResponse::new(StatusCode::OK, Some(json!({"code": code, "message": "m"})));
    let outcome = ApiOutcome::classify(raw, "ERROR_CODE");
    assert_eq!(
        matches!(outcome, ApiOutcome::Application { .. }),
        is_application
    );
}

#[test]
fn test_non_string_code_is_ignored() {
    let raw = RawResponse::new(StatusCode::OK, Some(json!({"code": 500, "items": []})));
    assert!(matches!(
        ApiOutcome::classify(raw, "ERROR_CODE"),
        ApiOutcome::Success(_)
    ));
}

#[test]
fn test_transport_error_uses_body_message() {
    let raw = RawResponse::new(
        StatusCode::TOO_MANY_REQUESTS,
        Some(json!({"message": "Rate limit exceeded"})),
    );
    let err = ApiOutcome::classify(raw, "ERROR_CODE")
        .into_result()
        .unwrap_err();
    assert!(matches!(err, Error::Transport { status: 429, .. }));
    assert_eq!(err.to_string(), "HTTP 429: Rate limit exceeded");
}

#[test]
fn test_transport_error_falls_back_to_reason_phrase() {
    let raw = RawResponse::new(StatusCode::SERVICE_UNAVAILABLE, None);
    let err = ApiOutcome::classify(raw, "ERROR_CODE")
        .into_result()
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");

    let raw = RawResponse::new(StatusCode::BAD_REQUEST, Some(json!(["not", "an", "object"])));
    let err = ApiOutcome::classify(raw, "ERROR_CODE")
        .into_result()
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 400: Bad Request");
}

#[test]
fn test_success_without_json_is_malformed() {
    let raw = RawResponse::new(StatusCode::OK, None);
    let outcome = ApiOutcome::classify(raw, "ERROR_CODE");
    assert!(matches!(outcome, ApiOutcome::Malformed { .. }));
    assert!(matches!(outcome.into_result(), Err(Error::Decode { .. })));
}

#[test]
fn test_success_passes_body_through() {
    let body = json!([{"id": 1, "display_name": "Identity"}]);
    let raw = RawResponse::new(StatusCode::OK, Some(body.clone()));
    assert_eq!(
        ApiOutcome::classify(raw, "ERROR_CODE").into_result().unwrap(),
        body
    );
}
