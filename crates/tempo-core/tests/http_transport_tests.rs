//! HTTP push transport tests against a mock push service.

use std::{sync::Arc, time::Duration};

use tempfile::TempDir;
use tempo_core::{
    models::{Notification, PushKeys, Subscription},
    params::{LogTime, Subscribe, UserId},
    DeliveryOutcome, DispatchReport, HttpPushTransport, PushTransport, TrackerBuilder,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn subscription(endpoint: String) -> Subscription {
    Subscription {
        user_id: "u1".to_string(),
        endpoint,
        keys: PushKeys {
            p256dh: "p256dh".to_string(),
            auth: "auth".to_string(),
        },
        created_at: jiff::Timestamp::now(),
    }
}

#[tokio::test]
async fn test_accepted_push_is_delivered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/push/device-1"))
        .and(header("TTL", "30"))
        .and(body_partial_json(serde_json::json!({
            "kind": "test",
            "title": "Ping"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpPushTransport::new(Duration::from_secs(30)).expect("transport");
    let payload = Notification::test("Ping", "pong").to_bytes().expect("payload");
    let outcome = transport
        .send(
            &payload,
            &subscription(format!("{}/push/device-1", mock_server.uri())),
        )
        .await;

    assert_eq!(outcome, DeliveryOutcome::Delivered);
}

#[tokio::test]
async fn test_gone_and_not_found_are_permanent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/push/expired"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/push/unknown"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let transport = HttpPushTransport::new(Duration::from_secs(30)).expect("transport");
    for device in ["expired", "unknown"] {
        let outcome = transport
            .send(
                b"{}",
                &subscription(format!("{}/push/{device}", mock_server.uri())),
            )
            .await;
        assert_eq!(outcome, DeliveryOutcome::Gone, "device {device}");
    }
}

#[tokio::test]
async fn test_server_errors_are_transient() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let transport = HttpPushTransport::new(Duration::from_secs(30)).expect("transport");
    let outcome = transport
        .send(
            b"{}",
            &subscription(format!("{}/push/busy", mock_server.uri())),
        )
        .await;

    assert!(matches!(outcome, DeliveryOutcome::Transient(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transient() {
    let transport = HttpPushTransport::new(Duration::from_secs(30)).expect("transport");
    let outcome = transport
        .send(b"{}", &subscription("http://127.0.0.1:9/push".to_string()))
        .await;

    assert!(matches!(outcome, DeliveryOutcome::Transient(_)));
}

#[tokio::test]
async fn test_log_event_end_to_end_prunes_expired_device() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/push/phone"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/push/old-laptop"))
        .respond_with(ResponseTemplate::new(410))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let transport = Arc::new(HttpPushTransport::new(Duration::from_secs(30)).expect("transport"));
    let tracker = TrackerBuilder::new()
        .with_database_path(temp_dir.path().join("tempo.db"))
        .with_transport(transport)
        .build()
        .await
        .expect("Failed to create tracker");

    for device in ["phone", "old-laptop"] {
        tracker
            .subscribe(&Subscribe {
                user_id: "u1".to_string(),
                endpoint: format!("{}/push/{device}", mock_server.uri()),
                keys: PushKeys::default(),
            })
            .await
            .expect("subscribe");
    }

    let receipt = tracker
        .log_time(&LogTime {
            user_id: "u1".to_string(),
            task_id: "t1".to_string(),
            milestone_id: Some("m1".to_string()),
            delta_mins: 30,
            estimate_mins: Some(30),
            ..Default::default()
        })
        .await
        .expect("log");

    assert!(receipt.outcome.milestone_just_completed);
    assert_eq!(
        receipt.log_dispatch,
        Some(DispatchReport::PartialFailure {
            delivered: 1,
            gone: 1,
            failed: 0
        })
    );
    // The dead endpoint was pruned before the milestone push
    assert_eq!(
        receipt.milestone_dispatch,
        Some(DispatchReport::Delivered { delivered: 1 })
    );

    let remaining = tracker
        .list_subscriptions(&UserId {
            user_id: "u1".to_string(),
        })
        .await
        .expect("list");
    assert_eq!(remaining.len(), 1);
    assert!(remaining.0[0].endpoint.ends_with("/push/phone"));
}
