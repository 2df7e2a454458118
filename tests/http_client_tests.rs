//! Integration tests for the request core.
//!
//! These tests run the HTTP client against a mock Zoho server and verify
//! token refresh and caching, query sanitizing, error classification and
//! the shared rate limiter.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use zoho_inventory::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, QueryParams};
use zoho_inventory::{
    AccessToken, AuthMode, ClientId, ClientSecret, RateLimitOptions, RateLimiterRegistry,
    RefreshToken, ZohoConfig,
};

const TOKEN_PATH: &str = "/oauth/v2/token";

fn create_test_config(server_uri: &str, refresh_token: &str) -> ZohoConfig {
    ZohoConfig::builder()
        .client_id(ClientId::new("1000.CLIENT").unwrap())
        .client_secret(ClientSecret::new("secret").unwrap())
        .refresh_token(RefreshToken::new(refresh_token).unwrap())
        .api_base_url(server_uri)
        .token_url(format!("{server_uri}{TOKEN_PATH}"))
        .build()
        .unwrap()
}

async fn mount_token_endpoint(server: &MockServer, access_token: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(query_param("client_id", "1000.CLIENT"))
        .and(query_param("client_secret", "secret"))
        .and(query_param("grant_type", "refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "api_domain": "https://www.zohoapis.com",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(calls)
        .mount(server)
        .await;
}

fn get(path: &str) -> HttpRequest {
    HttpRequest::builder(HttpMethod::Get, path).build().unwrap()
}

// ============================================================================
// Token Tests
// ============================================================================

#[tokio::test]
async fn test_first_request_refreshes_token_and_sends_bearer() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "fresh-token", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(2)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    let url = format!("{}/api/v1/items", server.uri());

    let first = client.execute(&url, get("items")).await.unwrap();
    let second = client.execute(&url, get("items")).await.unwrap();

    assert_eq!(first, json!({"items": []}));
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_valid_cached_token_skips_refresh() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "unused", 0).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(header("authorization", "Bearer cached-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    client
        .token_manager()
        .set_token(AccessToken::new(
            "cached-token",
            Utc::now() + chrono::Duration::minutes(30),
        ))
        .await;

    let url = format!("{}/api/v1/items", server.uri());
    client.execute(&url, get("items")).await.unwrap();
}

#[tokio::test]
async fn test_expired_token_is_refreshed() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "new-token", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(header("authorization", "Bearer new-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    client
        .token_manager()
        .set_token(AccessToken::new(
            "old-token",
            Utc::now() - chrono::Duration::seconds(1),
        ))
        .await;

    let url = format!("{}/api/v1/items", server.uri());
    client.execute(&url, get("items")).await.unwrap();

    let cached = client.token_manager().cached_token().await.unwrap();
    assert_eq!(cached.value(), "new-token");
    assert!(!cached.is_expired());
}

#[tokio::test]
async fn test_rejected_refresh_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid_code"})))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    let url = format!("{}/api/v1/items", server.uri());

    let error = client.execute(&url, get("items")).await.unwrap_err();

    assert!(matches!(error, HttpError::Auth(_)));
    assert_eq!(error.normalize().code, 401);
    assert!(error.normalize().message.contains("invalid_code"));
}

#[tokio::test]
async fn test_token_endpoint_status_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "invalid client"})),
        )
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();

    let error = client.token_manager().valid_token().await.unwrap_err();

    assert!(matches!(error, HttpError::Auth(ref auth) if auth.code == 400));
    assert!(error.normalize().message.contains("invalid client"));
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_auth_mode_none_sends_no_authorization_header() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "unused", 0).await;

    Mock::given(method("GET"))
        .and(path("/public"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "public")
        .auth_mode(AuthMode::None)
        .build()
        .unwrap();

    let body = client
        .execute(&format!("{}/public", server.uri()), request)
        .await
        .unwrap();
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn test_query_drops_undefined_and_mirrors_fulfillment_center() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/purchaseorders"))
        .and(|request: &Request| {
            let pairs: Vec<(String, String)> = request
                .url
                .query_pairs()
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();
            pairs
                == vec![
                    ("vendor_id".to_string(), "V 1".to_string()),
                    ("fulfillment_center_id".to_string(), "FC1".to_string()),
                    ("cf_fulfillment_center_id".to_string(), "FC1".to_string()),
                ]
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"purchaseorders": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();

    let mut query = QueryParams::new();
    query.insert("vendor_id", "V 1");
    query.set::<String>("status", None);
    query.insert("fulfillment_center_id", "FC1");

    let request = HttpRequest::builder(HttpMethod::Get, "purchaseorders")
        .query(query)
        .build()
        .unwrap();
    client
        .execute(&format!("{}/api/v1/purchaseorders", server.uri()), request)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/contacts"))
        .and(header("content-type", "application/json"))
        .and(|request: &Request| {
            serde_json::from_slice::<serde_json::Value>(&request.body)
                .map(|body| body["contact_name"] == "Acme")
                .unwrap_or(false)
        })
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"contact": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    let request = HttpRequest::builder(HttpMethod::Post, "contacts")
        .body(json!({"contact_name": "Acme"}))
        .build()
        .unwrap();

    let body = client
        .execute(&format!("{}/api/v1/contacts", server.uri()), request)
        .await
        .unwrap();
    assert_eq!(body, json!({"contact": {}}));
}

#[tokio::test]
async fn test_error_status_uses_zoho_message() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/purchaseorders/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 1002,
            "message": "not found"
        })))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();

    let error = client
        .execute(
            &format!("{}/api/v1/purchaseorders/missing", server.uri()),
            get("purchaseorders/missing"),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, HttpError::Api(ref api) if api.code == 404));
    let normalized = error.normalize();
    assert_eq!(normalized.code, 404);
    assert_eq!(normalized.message, "not found");
}

#[tokio::test]
async fn test_nested_error_message_takes_precedence() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "token", 1).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/purchaseorders/1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "outer",
            "error": {"message": "inner"}
        })))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    let request = HttpRequest::builder(HttpMethod::Put, "purchaseorders/1")
        .body(json!({}))
        .build()
        .unwrap();

    let error = client
        .execute(&format!("{}/api/v1/purchaseorders/1", server.uri()), request)
        .await
        .unwrap_err();
    assert_eq!(error.normalize().message, "inner");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let config = create_test_config("http://127.0.0.1:1", "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    client
        .token_manager()
        .set_token(AccessToken::new(
            "token",
            Utc::now() + chrono::Duration::minutes(30),
        ))
        .await;

    let error = client
        .execute("http://127.0.0.1:1/api/v1/items", get("items"))
        .await
        .unwrap_err();

    assert!(matches!(error, HttpError::Transport(_)));
    assert_eq!(error.normalize().code, 500);
}

#[tokio::test]
async fn test_invalid_request_is_rejected_before_sending() {
    let config = create_test_config("http://127.0.0.1:1", "1000.refresh");
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    let request = HttpRequest {
        http_method: HttpMethod::Put,
        path: "purchaseorders/1".to_string(),
        body: None,
        query: QueryParams::new(),
        auth_mode: AuthMode::Bearer,
    };

    let error = client
        .execute("http://127.0.0.1:1/api/v1/purchaseorders/1", request)
        .await
        .unwrap_err();
    assert!(matches!(error, HttpError::InvalidRequest(_)));
}

// ============================================================================
// Rate Limiter Tests
// ============================================================================

#[tokio::test]
async fn test_clients_with_same_refresh_token_share_bucket() {
    let registry = RateLimiterRegistry::new();
    let config = ZohoConfig::builder()
        .client_id(ClientId::new("1000.CLIENT").unwrap())
        .client_secret(ClientSecret::new("secret").unwrap())
        .refresh_token(RefreshToken::new("1000.shared").unwrap())
        .rate_limit(RateLimitOptions {
            capacity: Some(2),
            refill_interval: Some(Duration::from_secs(60)),
            refill_amount: Some(2),
            max_concurrent: None,
        })
        .build()
        .unwrap();

    let first = HttpClient::new(&config, &registry).unwrap();
    let second = HttpClient::new(&config, &registry).unwrap();
    assert!(Arc::ptr_eq(first.limiter(), second.limiter()));
    assert_eq!(registry.len(), 1);

    let _a = first.limiter().try_acquire().unwrap();
    let _b = second.limiter().try_acquire().unwrap();
    assert!(first.limiter().try_acquire().is_none());
}

#[tokio::test]
async fn test_clients_with_different_refresh_tokens_have_separate_buckets() {
    let registry = RateLimiterRegistry::new();
    let first = HttpClient::new(
        &create_test_config("http://127.0.0.1:1", "1000.one"),
        &registry,
    )
    .unwrap();
    let second = HttpClient::new(
        &create_test_config("http://127.0.0.1:1", "1000.two"),
        &registry,
    )
    .unwrap();

    assert!(!Arc::ptr_eq(first.limiter(), second.limiter()));
    assert_eq!(registry.len(), 2);
}

#[tokio::test]
async fn test_separate_registries_do_not_share_buckets() {
    let config = create_test_config("http://127.0.0.1:1", "1000.refresh");
    let first = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    let second = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();

    assert!(!Arc::ptr_eq(first.limiter(), second.limiter()));
}

#[tokio::test]
async fn test_token_is_resolved_after_waiting_for_permit() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "fresh-token", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(header("authorization", "Bearer short-lived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ZohoConfig::builder()
        .client_id(ClientId::new("1000.CLIENT").unwrap())
        .client_secret(ClientSecret::new("secret").unwrap())
        .refresh_token(RefreshToken::new("1000.refresh").unwrap())
        .api_base_url(server.uri())
        .token_url(format!("{}{TOKEN_PATH}", server.uri()))
        .rate_limit(RateLimitOptions {
            capacity: Some(1),
            refill_interval: Some(Duration::from_millis(1000)),
            refill_amount: Some(1),
            max_concurrent: None,
        })
        .build()
        .unwrap();
    let client = HttpClient::new(&config, &RateLimiterRegistry::new()).unwrap();
    client
        .token_manager()
        .set_token(AccessToken::new(
            "short-lived",
            Utc::now() + chrono::Duration::milliseconds(500),
        ))
        .await;

    let url = format!("{}/api/v1/items", server.uri());
    client.execute(&url, get("items")).await.unwrap();
    // The bucket is empty; the token expires while this call waits.
    client.execute(&url, get("items")).await.unwrap();
}
