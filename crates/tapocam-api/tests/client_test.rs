#![allow(clippy::unwrap_used)]
// Integration tests for `TapoClient` using wiremock: session lifecycle,
// retry-once-on-expiry protocol, and error decoration.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tapocam_api::{Credentials, Error, SetControl, TapoClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, TapoClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let credentials = Credentials::new("admin", SecretString::from("secret".to_string()));
    let client = TapoClient::with_client(reqwest::Client::new(), base_url, &credentials);
    (server, client)
}

fn login_ok(stok: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "error_code": 0,
        "result": { "stok": stok, "user_group": "root" }
    }))
}

fn device_error(code: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "error_code": code }))
}

// ── Session lifecycle ───────────────────────────────────────────────

#[tokio::test]
async fn cold_start_performs_one_login_then_one_session_call() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "method": "login",
            "params": { "hashed": true, "username": "admin" }
        })))
        .respond_with(login_ok("tok1"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/stok=tok1/ds"))
        .respond_with(device_error(0))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.execute(&json!({ "method": "get" })).await.unwrap();
    assert_eq!(result["error_code"], 0);
    assert_eq!(client.session().token().await.as_deref(), Some("tok1"));
}

#[tokio::test]
async fn second_call_reuses_the_token_without_logging_in_again() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(login_ok("tok1"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/stok=tok1/ds"))
        .respond_with(device_error(0))
        .expect(2)
        .mount(&server)
        .await;

    client.execute(&json!({ "method": "get" })).await.unwrap();
    client.execute(&json!({ "method": "get" })).await.unwrap();
}

#[tokio::test]
async fn failed_login_installs_no_token_and_is_retried_on_next_call() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let result = client.execute(&json!({ "method": "get" })).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert_eq!(client.session().token().await, None);

    // The next call attempts a fresh login.
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(login_ok("tok2"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/stok=tok2/ds"))
        .respond_with(device_error(0))
        .expect(1)
        .mount(&server)
        .await;

    client.execute(&json!({ "method": "get" })).await.unwrap();
}

#[tokio::test]
async fn login_rejected_by_device_code_is_an_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(device_error(-40401))
        .mount(&server)
        .await;

    let result = client.execute(&json!({ "method": "get" })).await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
    assert_eq!(client.session().token().await, None);
}

// ── Expiry and retry ────────────────────────────────────────────────

#[tokio::test]
async fn expired_token_triggers_one_refresh_and_one_retry() {
    let (server, client) = setup().await;

    // First login issues a token the device has since invalidated.
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(login_ok("stale"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/stok=stale/ds"))
        .respond_with(device_error(-40401))
        .expect(1)
        .mount(&server)
        .await;

    // Refresh issues a fresh token; the retried request succeeds.
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(login_ok("fresh"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/stok=fresh/ds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error_code": 0,
            "seq": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.execute(&json!({ "method": "get" })).await.unwrap();
    assert_eq!(result["seq"], 2, "expected the retried attempt's result");
    assert_eq!(client.session().token().await.as_deref(), Some("fresh"));
}

#[tokio::test]
async fn second_expiry_is_terminal_with_no_third_attempt() {
    let (server, client) = setup().await;

    // Both the initial login and the refresh succeed, but the device
    // rejects the token every time.
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(login_ok("tok"))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/stok=tok/ds"))
        .respond_with(device_error(-40401))
        .expect(2)
        .mount(&server)
        .await;

    let result = client.execute(&json!({ "method": "get" })).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    // Mock expectations verify exactly two session calls were made.
}

// ── Non-recoverable failures ────────────────────────────────────────

#[tokio::test]
async fn device_error_is_decorated_and_not_retried() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(login_ok("tok"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/stok=tok/ds"))
        .respond_with(device_error(-64302))
        .expect(1)
        .mount(&server)
        .await;

    let request = json!({ "method": "do", "preset": { "goto_preset": { "id": 9 } } });
    let result = client.execute(&request).await;

    match result {
        Err(Error::Device { code, message, request }) => {
            assert_eq!(code, -64302);
            assert_eq!(message, "Preset ID not found");
            assert!(request.contains("goto_preset"), "payload attached: {request}");
        }
        other => panic!("expected Device error, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_200_session_response_propagates_without_retry() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(login_ok("tok"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/stok=tok/ds"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.execute(&json!({ "method": "get" })).await;
    assert!(matches!(result, Err(Error::Status { status: 500 })));
}

#[tokio::test]
async fn malformed_session_response_is_a_protocol_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(login_ok("tok"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/stok=tok/ds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let result = client.execute(&json!({ "method": "get" })).await;
    assert!(matches!(result, Err(Error::Protocol { .. })));
}

// ── Typed operations over the wire ──────────────────────────────────

#[tokio::test]
async fn set_sends_the_merged_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(login_ok("tok"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/stok=tok/ds"))
        .and(body_partial_json(json!({
            "method": "set",
            "led": { "config": { "enabled": "on" } }
        })))
        .respond_with(device_error(0))
        .expect(1)
        .mount(&server)
        .await;

    client.set(&[SetControl::Led(true)]).await.unwrap();
}
