#![allow(missing_docs)]

use axum::http::{Method, StatusCode};
use onecrm_core::ApiClientError;
use onecrm_core::oauth2::{AuthFlow, AuthFlowSettings};
use rstest::rstest;
use serde_json::json;
use tokio_util::sync::CancellationToken;

mod common;
pub use self::common::*;

const TOKEN_RESPONSE: &str = r#"{
    "access_token": "tok123",
    "token_type": "Bearer",
    "expires_in": 3600,
    "refresh_token": "ref456"
}"#;

async fn token_server() -> anyhow::Result<MockServer> {
    init_tracing();
    MockServer::start(MockResponse::ok(TOKEN_RESPONSE)).await
}

#[rstest]
#[tokio::test]
async fn should_obtain_token_with_client_credentials() -> anyhow::Result<()> {
    let server = token_server().await?;
    let flow = AuthFlow::builder(server.base_url())
        .with_client_id("abc")
        .with_client_secret("xyz")
        .build();

    let token = flow.init_client_credentials(CancellationToken::new()).await?;

    assert_eq!(token.access_token(), "tok123");
    assert_eq!(token.token_type(), "Bearer");
    assert_eq!(token.expires_in(), 3600);
    assert_eq!(token.refresh_token(), Some("ref456"));

    let request = server.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path_and_query, "/api.php/auth/user/access_token");
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.header("authorization"), None);
    assert_eq!(
        request.json(),
        json!({
            "grant_type": "client_credentials",
            "client_id": "abc",
            "client_secret": "xyz",
            "scope": "profile",
        })
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_obtain_token_for_resource_owner() -> anyhow::Result<()> {
    let server = token_server().await?;
    let settings = AuthFlowSettings::from_lookup(|key| match key {
        "ONECRM_CLIENT_ID" => Some("abc".to_string()),
        "ONECRM_CLIENT_SECRET" => Some("xyz".to_string()),
        "ONECRM_USERNAME" => Some("jdoe".to_string()),
        "ONECRM_PASSWORD" => Some("hunter2".to_string()),
        _ => None,
    });
    let flow = AuthFlow::builder(server.base_url())
        .with_settings(settings)
        .with_owner_type("contact")
        .with_scope("profile email")
        .build();

    let token = flow.init_resource_owner(CancellationToken::new()).await?;

    assert_eq!(token.access_token(), "tok123");
    let request = server.last_request();
    assert_eq!(request.path_and_query, "/api.php/auth/contact/access_token");
    assert_eq!(
        request.json(),
        json!({
            "grant_type": "password",
            "client_id": "abc",
            "client_secret": "xyz",
            "scope": "profile email",
            "username": "jdoe",
            "password": "hunter2",
        })
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_complete_authorization_code_flow() -> anyhow::Result<()> {
    let server = token_server().await?;
    let flow = AuthFlow::builder(server.base_url())
        .with_client_id("abc")
        .with_client_secret("xyz")
        .with_redirect_uri("https://app.test/callback")
        .with_state("s1")
        .build();

    let authorize_url = flow.init_auth_code()?;
    assert_eq!(authorize_url.path(), "/api.php/auth/user/authorize");
    assert!(server.requests().is_empty(), "no request before finalize");

    let token = flow
        .finalize_auth_code("c0de", CancellationToken::new())
        .await?;

    assert_eq!(token.access_token(), "tok123");
    assert_eq!(
        server.last_request().json(),
        json!({
            "grant_type": "authorization_code",
            "client_id": "abc",
            "client_secret": "xyz",
            "scope": "profile",
            "code": "c0de",
            "redirect_uri": "https://app.test/callback",
        })
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_report_rejected_credentials() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start(MockResponse::status(
        StatusCode::UNAUTHORIZED,
        r#"{"error":"invalid_client"}"#,
    ))
    .await?;
    let flow = AuthFlow::builder(server.base_url()).build();

    let result = flow.init_client_credentials(CancellationToken::new()).await;

    match result {
        Err(ApiClientError::Api(error)) => {
            assert_eq!(error.code(), 401);
            assert_eq!(error.message(), r#"{"error":"invalid_client"}"#);
        }
        Err(error) => anyhow::bail!("Expected ApiClientError::Api, got: {error:?}"),
        Ok(token) => anyhow::bail!("Expected an API error, got: {token:?}"),
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_report_malformed_token() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start(MockResponse::ok(r#"{"access_token": 42}"#)).await?;
    let flow = AuthFlow::builder(server.base_url()).build();

    let result = flow.init_client_credentials(CancellationToken::new()).await;

    match result {
        Err(ApiClientError::JsonError { path, .. }) => assert_eq!(path, "access_token"),
        Err(error) => anyhow::bail!("Expected ApiClientError::JsonError, got: {error:?}"),
        Ok(token) => anyhow::bail!("Expected a JSON error, got: {token:?}"),
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_cancel_token_request() -> anyhow::Result<()> {
    let server = token_server().await?;
    let flow = AuthFlow::builder(server.base_url()).build();
    let cancellation = CancellationToken::new();
    cancellation.cancel();

    let result = flow.init_client_credentials(cancellation).await;

    assert!(matches!(result, Err(ApiClientError::Cancelled)));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_not_leak_token_of_malformed_response() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start(MockResponse::ok(
        r#"{"access_token":"SECRET-TOKEN","expires_in":"3600"}"#,
    ))
    .await?;
    let flow = AuthFlow::builder(server.base_url()).build();

    let Err(error) = flow.init_client_credentials(CancellationToken::new()).await else {
        anyhow::bail!("Expected a JSON error on a string `expires_in`");
    };

    assert!(matches!(&error, ApiClientError::JsonError { path, .. } if path == "expires_in"));
    assert!(!format!("{error}").contains("SECRET-TOKEN"));
    assert!(!format!("{error:?}").contains("SECRET-TOKEN"));
    Ok(())
}
