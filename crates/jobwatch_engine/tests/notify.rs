use std::time::Duration;

use jobwatch_engine::{
    ConfigError, Notifier, NotifyError, TelegramCredentials, TelegramNotifier, CHAT_ID_VAR,
    TOKEN_VAR,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:test-token";

fn notifier(api_base: &str) -> TelegramNotifier {
    jobwatch_logging::initialize_for_tests();
    let credentials = TelegramCredentials::new(Some(TOKEN), Some("42")).unwrap();
    TelegramNotifier::new(api_base, credentials, Duration::from_secs(5))
}

#[test]
fn credentials_require_both_values() {
    assert_eq!(
        TelegramCredentials::new(None, Some("42")).unwrap_err(),
        ConfigError::Missing(TOKEN_VAR)
    );
    assert_eq!(
        TelegramCredentials::new(Some(TOKEN), Some("  ")).unwrap_err(),
        ConfigError::Missing(CHAT_ID_VAR)
    );
    let credentials = TelegramCredentials::new(Some(TOKEN), Some("42")).unwrap();
    assert!(!format!("{credentials:?}").contains("test-token"));
}

#[tokio::test]
async fn posts_form_encoded_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_string_contains("chat_id=42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true,"result":{}}"#))
        .expect(1)
        .mount(&server)
        .await;

    notifier(&server.uri())
        .notify("New job:\nStore Assistant & Co")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let fields: Vec<(String, String)> = url::form_urlencoded::parse(&requests[0].body)
        .into_owned()
        .collect();
    assert_eq!(
        fields,
        vec![
            ("chat_id".to_string(), "42".to_string()),
            ("text".to_string(), "New job:\nStore Assistant & Co".to_string()),
        ]
    );
}

#[tokio::test]
async fn error_status_reports_status_and_body_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"ok":false,"description":"Bad Request: chat not found"}"#),
        )
        .mount(&server)
        .await;

    let err = notifier(&server.uri()).notify("hi").await.unwrap_err();
    match &err {
        NotifyError::Status { status, excerpt } => {
            assert_eq!(*status, 400);
            assert!(excerpt.contains("chat not found"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(!err.to_string().contains("test-token"));
}

#[tokio::test]
async fn ok_false_reply_is_refused() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"ok":false,"description":"Forbidden: bot was blocked"}"#),
        )
        .mount(&server)
        .await;

    let err = notifier(&server.uri()).notify("hi").await.unwrap_err();
    match err {
        NotifyError::Refused(description) => assert_eq!(description, "Forbidden: bot was blocked"),
        other => panic!("expected refusal, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_hides_token() {
    // Reserve a port, then release it so nothing listens there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let api_base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = notifier(&api_base).notify("hi").await.unwrap_err();
    assert!(matches!(err, NotifyError::Transport(_)), "got {err:?}");
    assert!(!err.to_string().contains("test-token"));
}
