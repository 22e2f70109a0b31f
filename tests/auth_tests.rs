mod common;

use common::{invalid_session_body, session_body, test_config};
use pihole_client::prelude::*;
use tokio_test::assert_ok;

#[tokio::test]
async fn login_stores_session_and_returns_headers() {
    let mut server = mockito::Server::new_async().await;
    let auth_mock = server
        .mock("POST", "/api/auth")
        .match_body(mockito::Matcher::PartialJson(json!({
            "password": "test-password"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(session_body("test-sid", "test-csrf"))
        .create_async()
        .await;

    let client = PiHoleClient::new(test_config(&server.url()))
        .await
        .expect("login should succeed");

    let session = client.session().await.expect("session should be stored");
    assert_eq!(session.sid, "test-sid");
    assert_eq!(session.csrf, "test-csrf");
    assert_eq!(session.validity_secs, 300);

    let headers = client
        .auth()
        .session_headers()
        .await
        .expect("headers should be available");
    assert_eq!(headers[0], (SESSION_ID_HEADER, "test-sid".to_string()));
    assert_eq!(headers[1], (CSRF_HEADER, "test-csrf".to_string()));

    auth_mock.assert_async().await;
}

#[tokio::test]
async fn invalid_credentials_fail_after_exact_retry_budget() {
    let mut server = mockito::Server::new_async().await;
    let auth_mock = server
        .mock("POST", "/api/auth")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(invalid_session_body("password incorrect"))
        .expect(3)
        .create_async()
        .await;

    let config = test_config(&server.url()).with_max_retries(3);
    let err = PiHoleClient::new(config)
        .await
        .err()
        .expect("construction should fail");

    match err {
        ClientError::Authentication(msg) => {
            assert!(msg.contains("invalid session response"), "got: {msg}");
        }
        other => panic!("Unexpected error: {other:?}"),
    }

    auth_mock.assert_async().await;
}

#[tokio::test]
async fn login_error_message_extracted_from_non_200_body() {
    let mut server = mockito::Server::new_async().await;
    let auth_mock = server
        .mock("POST", "/api/auth")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(invalid_session_body("password incorrect"))
        .expect(2)
        .create_async()
        .await;

    let config = test_config(&server.url()).with_max_retries(2);
    let err = PiHoleClient::new(config)
        .await
        .err()
        .expect("construction should fail");

    match err {
        ClientError::Authentication(msg) => {
            assert!(msg.contains("password incorrect"), "got: {msg}");
        }
        other => panic!("Unexpected error: {other:?}"),
    }

    auth_mock.assert_async().await;
}

#[tokio::test]
async fn login_synthesizes_message_for_unparsable_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth")
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&server.url()).with_max_retries(1);
    let err = PiHoleClient::new(config)
        .await
        .err()
        .expect("construction should fail");

    match err {
        ClientError::Authentication(msg) => {
            assert!(msg.contains("HTTP 500"), "got: {msg}");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_login_body_is_an_authentication_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"took": 0.001}"#)
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&server.url()).with_max_retries(1);
    let err = PiHoleClient::new(config)
        .await
        .err()
        .expect("construction should fail");

    match err {
        ClientError::Authentication(msg) => {
            assert!(msg.contains("missing session"), "got: {msg}");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_surfaces_connection_cause() {
    // Nothing listens on this port; connects are refused immediately
    let config = ClientConfig::new("http://127.0.0.1:9", "test-password")
        .with_retry_delay_secs(0)
        .with_max_retries(1);

    let err = PiHoleClient::new(config)
        .await
        .err()
        .expect("construction should fail");

    match err {
        ClientError::Authentication(msg) => {
            assert!(msg.contains("connection error"), "got: {msg}");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn lazy_client_authenticates_on_first_request() {
    let mut server = mockito::Server::new_async().await;
    let auth_mock = server
        .mock("POST", "/api/auth")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(session_body("lazy-sid", "lazy-csrf"))
        .expect(1)
        .create_async()
        .await;
    let get_mock = server
        .mock("GET", "/api/dns/blocking")
        .match_header(SESSION_ID_HEADER, "lazy-sid")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"blocking": "enabled"}"#)
        .create_async()
        .await;

    let client = PiHoleClient::new_lazy(test_config(&server.url())).expect("client should build");
    assert!(client.session().await.is_none());

    let response = tokio_test::assert_ok!(client.get("dns/blocking", None).await);
    assert_eq!(
        response.as_structured(),
        Some(&json!({"blocking": "enabled"}))
    );
    assert!(client.session().await.is_some());

    auth_mock.assert_async().await;
    get_mock.assert_async().await;
}

#[tokio::test]
async fn close_deletes_session_and_is_idempotent() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(session_body("close-sid", "close-csrf"))
        .expect(1)
        .create_async()
        .await;
    let logout_mock = server
        .mock("DELETE", "/api/auth")
        .match_header(SESSION_ID_HEADER, "close-sid")
        .match_header(CSRF_HEADER, "close-csrf")
        .with_status(204)
        .with_body("")
        .expect(1)
        .create_async()
        .await;

    let client = PiHoleClient::new(test_config(&server.url()))
        .await
        .expect("login should succeed");

    let first = client.close().await;
    assert!(first.is_empty());
    assert!(client.session().await.is_none());

    // Second close has no live session to delete and must not error
    let second = client.close().await;
    assert!(second.is_empty());
    assert!(client.session().await.is_none());

    logout_mock.assert_async().await;
}

#[tokio::test]
async fn close_folds_logout_failure_into_error_mapping() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(session_body("fold-sid", "fold-csrf"))
        .expect(1)
        .create_async()
        .await;
    let logout_mock = server
        .mock("DELETE", "/api/auth")
        .with_status(502)
        .with_body("bad gateway")
        .expect(2)
        .create_async()
        .await;

    let config = test_config(&server.url()).with_max_retries(1);
    let client = PiHoleClient::new(config)
        .await
        .expect("login should succeed");

    let response = client.close().await;
    let body = response
        .as_structured()
        .expect("failure should fold into a mapping");
    assert!(body["error"].as_str().unwrap_or_default().contains("502"));
    assert!(client.session().await.is_none());

    logout_mock.assert_async().await;
}
