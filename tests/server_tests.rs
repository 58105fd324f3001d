mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use common::{
    CallLog, FakeCompletion, FakeSlack, SIGNING_SECRET, build_app, slash_body, test_config,
};
use redraft::api::signature::compute_signature;
use redraft::app::Topology;
use redraft::server::router;
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

fn app_router(log: &CallLog, slack: &Arc<FakeSlack>) -> axum::Router {
    let completion = Arc::new(FakeCompletion::replying(log.clone(), "See you soon!"));
    let config = test_config(&[("REWRITE_UI_MODE", "ephemeral")]);
    router(Arc::new(build_app(config, slack, &completion, Topology::Background)))
}

fn signed_request(body: &str) -> Request<Body> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        .to_string();
    let sig = compute_signature(&ts, body, SIGNING_SECRET);

    Request::builder()
        .method("POST")
        .uri("/slack/events")
        .header("content-type", "application/x-www-form-urlencoded")
        .header("x-slack-request-timestamp", ts)
        .header("x-slack-signature", sig)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_healthz() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    let response = app_router(&log, &slack)
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unsigned_request_is_rejected() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    let request = Request::post("/slack/events")
        .body(Body::from(slash_body("see you later")))
        .unwrap();

    let response = app_router(&log, &slack).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn test_slash_command_end_to_end() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));

    let response = app_router(&log, &slack)
        .oneshot(signed_request(&slash_body("see you later")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["response_type"], "ephemeral");

    slack.wait_rendered().await;
    assert_eq!(log.entries(), vec!["ack", "complete", "respond"]);

    let calls = slack.calls();
    let common::SlackCall::Respond { payload, .. } = &calls[0] else {
        panic!("expected response_url post, got {:?}", calls[0]);
    };
    assert_eq!(
        payload["text"],
        "Original: see you later\nSuggestion: See you soon!"
    );
}
