//! End-to-end tests for the registration and notification services.
//!
//! Both routers run on loopback sockets and talk to each other over HTTP;
//! only `MySQL` and SMTP are replaced with in-memory fakes.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use otp_signup_core::RegistrationRequest;
use otp_signup_integration_tests::{MemoryStore, RecordingMailer, TestStack};

const ANN: &str = r#"{"name":"Ann","email":"ann@x.com","password":"pw"}"#;

fn ann() -> RegistrationRequest {
    RegistrationRequest {
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
        password: "pw".to_string(),
    }
}

// =============================================================================
// Registration Flow
// =============================================================================

#[tokio::test]
async fn test_registration_delivers_stored_otp() {
    let stack = TestStack::start(MemoryStore::default(), RecordingMailer::new(true))
        .await
        .unwrap();

    let resp = stack.register_user(&ann()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "OTP sent to your email"}));

    let rows = stack.store.rows();
    assert_eq!(rows.len(), 1);
    let row = rows.first().unwrap();
    assert_eq!(row.name, "Ann");
    assert_eq!(row.email, "ann@x.com");
    assert_eq!(row.password, "pw");

    let otp = row.otp.as_str();
    assert_eq!(otp.len(), 6);
    assert!(otp.chars().all(|c| c.is_ascii_digit()));
    let value: u32 = otp.parse().unwrap();
    assert!((100_000..=999_999).contains(&value));

    assert_eq!(
        stack.mailer.delivered(),
        vec![("ann@x.com".to_string(), otp.to_string())]
    );
}

#[tokio::test]
async fn test_repeated_registration_issues_fresh_rows() {
    let stack = TestStack::start(MemoryStore::default(), RecordingMailer::new(true))
        .await
        .unwrap();

    for _ in 0..2 {
        assert_eq!(stack.register(ANN).await.unwrap().status(), StatusCode::OK);
    }

    let rows = stack.store.rows();
    let delivered = stack.mailer.delivered();
    assert_eq!(rows.len(), 2);
    assert_eq!(delivered.len(), 2);
    for (row, (_, otp)) in rows.iter().zip(&delivered) {
        assert_eq!(row.otp.as_str(), otp);
    }
}

#[tokio::test]
async fn test_invalid_details_touch_nothing() {
    let stack = TestStack::start(MemoryStore::default(), RecordingMailer::new(true))
        .await
        .unwrap();

    for payload in [
        r#"{"name":"Ann","email":"ann@x.com"}"#,
        r#"{"name":"","email":"ann@x.com","password":"pw"}"#,
        r#"{"name":"Ann","email":null,"password":"pw"}"#,
        "[1, 2, 3]",
    ] {
        let resp = stack.register(payload).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(resp.text().await.unwrap(), "Details are not correct");
    }

    assert!(stack.store.rows().is_empty());
    assert!(stack.mailer.delivered().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let stack = TestStack::start(MemoryStore::default(), RecordingMailer::new(true))
        .await
        .unwrap();

    let resp = stack.register("{not json").await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Invalid JSON in request body");
    assert!(stack.store.rows().is_empty());
}

#[tokio::test]
async fn test_store_failure_skips_notification() {
    let stack = TestStack::start(MemoryStore::unavailable(), RecordingMailer::new(true))
        .await
        .unwrap();

    let resp = stack.register(ANN).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = resp.text().await.unwrap();
    assert!(body.starts_with("Database error: internal failure (reference "));
    assert!(!body.contains("pool timed out"));

    assert!(stack.mailer.delivered().is_empty());
}

// =============================================================================
// Notification Failures
// =============================================================================

#[tokio::test]
async fn test_mail_rejection_still_registers() {
    let stack = TestStack::start(MemoryStore::default(), RecordingMailer::new(false))
        .await
        .unwrap();

    let resp = stack.register(ANN).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(stack.store.rows().len(), 1);
    assert_eq!(stack.mailer.delivered().len(), 1);
}

#[tokio::test]
async fn test_unreachable_notification_service_still_registers() {
    let store = Arc::new(MemoryStore::default());
    let registration_url =
        TestStack::start_registration(store.clone(), "http://127.0.0.1:1/send-email")
            .await
            .unwrap();

    let resp = reqwest::Client::new()
        .post(format!("{registration_url}/register"))
        .header("content-type", "application/json")
        .body(ANN)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(store.rows().len(), 1);
}

// =============================================================================
// Notification Service
// =============================================================================

#[tokio::test]
async fn test_send_email_contract() {
    let stack = TestStack::start(MemoryStore::default(), RecordingMailer::new(true))
        .await
        .unwrap();
    let url = format!("{}/send-email", stack.notification_url);

    let resp = stack
        .client
        .post(&url)
        .json(&json!({"email": "a@b.com", "otp": "123456"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!("Email sent successfully"));

    let resp = stack.client.post(&url).json(&json!({})).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!("Email and OTP are required")
    );

    assert_eq!(
        stack.mailer.delivered(),
        vec![("a@b.com".to_string(), "123456".to_string())]
    );
}

#[tokio::test]
async fn test_health_endpoints() {
    let stack = TestStack::start(MemoryStore::default(), RecordingMailer::new(true))
        .await
        .unwrap();

    for url in [
        format!("{}/health", stack.registration_url),
        format!("{}/health/ready", stack.registration_url),
        format!("{}/health", stack.notification_url),
    ] {
        let resp = stack.client.get(&url).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{url}");
    }
}
