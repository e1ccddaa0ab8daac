//! Webhook delivery tests against a mocked HTTP endpoint.

use chrono::{TimeZone, Utc};
use fuelwatch_core::integrations::DiscordNotifier;
use fuelwatch_core::{CoreError, Notifier, NotifyError, StatusReportBuilder};
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

const HOOK_PATH: &str = "/api/webhooks/123456/abc123";

fn notifier(server: &mockito::Server) -> DiscordNotifier {
    let url = format!("{}{HOOK_PATH}", server.url());
    DiscordNotifier::new(&url, Duration::from_secs(5)).unwrap()
}

#[test]
fn test_send_posts_content_json() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", HOOK_PATH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "content": "hello fleet" })))
        .with_status(204)
        .expect(1)
        .create();

    notifier(&server).send("hello fleet").unwrap();
    mock.assert();
}

#[test]
fn test_notifier_sends_repeatedly() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", HOOK_PATH)
        .with_status(204)
        .expect(3)
        .create();

    let notifier = notifier(&server);
    for text in ["one", "two", "three"] {
        notifier.send(text).unwrap();
    }
    mock.assert();
}

#[test]
fn test_send_surfaces_http_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", HOOK_PATH)
        .with_status(400)
        .with_body(r#"{"message": "Cannot send an empty message"}"#)
        .create();

    let err = notifier(&server).send("").unwrap_err();
    match err {
        NotifyError::Http { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Cannot send an empty message"));
        }
        other => panic!("unexpected error: {other}"),
    }
    mock.assert();
}

#[test]
fn test_report_posts_one_request_per_message() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", HOOK_PATH)
        .match_body(Matcher::Regex(r#"^\{"content":".*\\n"\}$"#.to_string()))
        .with_status(204)
        .expect(3)
        .create();

    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); 3];
    rows.extend((0..20).map(|i| vec![format!("Structure {i:02}"), "9 days 0 hours".to_string()]));

    // Each line takes 63 characters with its newline: nine per message, 9 + 9 + 2.
    let report = StatusReportBuilder::new("Fuel")
        .with_max_message_len(600)
        .render("T", &rows, now)
        .unwrap();
    let expected = report.chunks.len();

    let summary = StatusReportBuilder::new("Fuel")
        .with_max_message_len(600)
        .send("T", &rows, now, &notifier(&server))
        .unwrap();

    assert_eq!(summary.messages_sent, expected);
    assert_eq!(expected, 3);
    mock.assert();
}

#[test]
fn test_report_stops_at_first_failed_message() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", HOOK_PATH)
        .with_status(500)
        .expect(1)
        .create();

    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); 3];
    rows.extend((0..40).map(|i| vec![format!("Structure {i:02}"), "1 days 0 hours".to_string()]));

    let err = StatusReportBuilder::default()
        .with_max_message_len(300)
        .send("T", &rows, now, &notifier(&server))
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::Delivery {
            index: 1,
            source: NotifyError::Http { status: 500, .. },
            ..
        }
    ));
    mock.assert();
}

#[test]
fn test_unreachable_endpoint_is_transport_error() {
    // Nothing listens on port 9 on loopback in CI.
    let notifier = DiscordNotifier::new(
        "http://127.0.0.1:9/api/webhooks/1/a",
        Duration::from_secs(2),
    )
    .unwrap();
    assert!(matches!(
        notifier.send("hello"),
        Err(NotifyError::Transport(_))
    ));
}
