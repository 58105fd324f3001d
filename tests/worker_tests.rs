mod common;

use common::{CallLog, FakeCompletion, FakeSlack, RESPONSE_URL, SlackCall};
use redraft::ai::{CompletionClient, OpenAiClient, Rewriter};
use redraft::core::models::{DeliveryTarget, DispatchPayload, WorkerEvent};
use redraft::core::session::ToggleState;
use redraft::slack::SlackApi;
use redraft::worker::{Worker, handle_worker_event};
use serde_json::json;
use std::sync::Arc;

fn worker_with(slack: &Arc<FakeSlack>, completion: Arc<dyn CompletionClient>) -> Worker {
    Worker::new(
        Rewriter::new(completion),
        Arc::clone(slack) as Arc<dyn SlackApi>,
    )
}

fn modal_payload(text: &str) -> DispatchPayload {
    DispatchPayload {
        text: text.to_string(),
        target: DeliveryTarget::View {
            view_id: "V123".to_string(),
        },
    }
}

fn ephemeral_payload(text: &str) -> DispatchPayload {
    DispatchPayload {
        text: text.to_string(),
        target: DeliveryTarget::ResponseUrl {
            response_url: RESPONSE_URL.to_string(),
        },
    }
}

#[tokio::test]
async fn test_success_renders_one_modal_with_both_texts() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    let completion = Arc::new(FakeCompletion::replying(log.clone(), "See you soon!"));
    let worker = worker_with(&slack, completion);

    worker.run(&modal_payload("see you later")).await;

    let calls = slack.calls();
    assert_eq!(calls.len(), 1, "exactly one render call: {calls:?}");
    let SlackCall::UpdateView { view_id, view } = &calls[0] else {
        panic!("expected views.update, got {:?}", calls[0]);
    };
    assert_eq!(view_id, "V123");
    assert_eq!(view["title"]["text"], "Suggestion Ready");
    assert_eq!(view["blocks"][0]["element"]["initial_value"], "See you soon!");

    let state = ToggleState::from_metadata(view["private_metadata"].as_str().unwrap()).unwrap();
    assert_eq!(state.original(), "see you later");
    assert_eq!(state.ai(), "See you soon!");
}

#[tokio::test]
async fn test_success_renders_ephemeral_choice() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    let completion = Arc::new(FakeCompletion::replying(log.clone(), "See you soon!"));
    let worker = worker_with(&slack, completion);

    worker.run(&ephemeral_payload("see you later")).await;

    let calls = slack.calls();
    assert_eq!(calls.len(), 1);
    let SlackCall::Respond {
        response_url,
        payload,
    } = &calls[0]
    else {
        panic!("expected response_url post, got {:?}", calls[0]);
    };
    assert_eq!(response_url, RESPONSE_URL);
    assert_eq!(
        payload["text"],
        "Original: see you later\nSuggestion: See you soon!"
    );

    let buttons = payload["blocks"][2]["elements"].as_array().unwrap();
    assert_eq!(buttons[0]["action_id"], "send");
    assert_eq!(buttons[0]["value"], "See you soon!");
    assert_eq!(buttons[1]["action_id"], "cancel");
    assert_eq!(buttons[1]["value"], "see you later");
}

#[tokio::test]
async fn test_non_ascii_rewrite_fits_modal_metadata() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    let suggestion = "日本語".repeat(200);
    let completion = Arc::new(FakeCompletion::replying(log.clone(), &suggestion));
    let worker = worker_with(&slack, completion);

    worker.run(&modal_payload(&"日本語".repeat(200))).await;

    let calls = slack.calls();
    assert_eq!(calls.len(), 1);
    let SlackCall::UpdateView { view, .. } = &calls[0] else {
        panic!("expected views.update, got {:?}", calls[0]);
    };
    assert_eq!(view["title"]["text"], "Suggestion Ready");
    let state = ToggleState::from_metadata(view["private_metadata"].as_str().unwrap()).unwrap();
    assert_eq!(state.ai(), suggestion);
}

#[tokio::test]
async fn test_long_draft_still_renders_ephemeral_suggestion() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    let completion = Arc::new(FakeCompletion::replying(log.clone(), "Short and sweet."));
    let worker = worker_with(&slack, completion);

    worker.run(&ephemeral_payload(&"a".repeat(3500))).await;

    let calls = slack.calls();
    assert_eq!(calls.len(), 1);
    let SlackCall::Respond { payload, .. } = &calls[0] else {
        panic!("expected response_url post, got {:?}", calls[0]);
    };
    for block in payload["blocks"].as_array().unwrap() {
        if block["type"] == "section" {
            assert!(block["text"]["text"].as_str().unwrap().chars().count() <= 3000);
        }
    }
    assert_eq!(
        payload["blocks"][1]["text"]["text"],
        ":sparkles: *Suggestion:* Short and sweet."
    );
}

#[tokio::test]
async fn test_completion_failure_renders_one_error_modal() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    let completion = Arc::new(FakeCompletion::failing(log.clone(), "upstream 503"));
    let worker = worker_with(&slack, completion);

    worker.run(&modal_payload("see you later")).await;

    let calls = slack.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        SlackCall::UpdateView { view, .. } => {
            assert_eq!(view["title"]["text"], "Error");
            assert!(
                view["blocks"][0]["text"]["text"]
                    .as_str()
                    .unwrap()
                    .contains("something went wrong")
            );
        }
        other => panic!("expected error modal, got {other:?}"),
    }
    assert_eq!(log.entries(), vec!["complete", "update_view"]);
}

#[tokio::test]
async fn test_blank_completion_is_treated_as_failure() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    let completion = Arc::new(FakeCompletion::replying(log.clone(), "   \n"));
    let worker = worker_with(&slack, completion);

    worker.run(&ephemeral_payload("see you later")).await;

    let calls = slack.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        SlackCall::Respond { payload, .. } => {
            assert!(payload["text"].as_str().unwrap().contains("something went wrong"));
            assert!(payload.get("blocks").is_none());
        }
        other => panic!("expected error message, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_api_key_renders_error_without_network() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    // Nothing listens on the discard port.
    let client = OpenAiClient::new(
        None,
        None,
        "gpt-4o-mini".to_string(),
        0.7,
        "http://127.0.0.1:9".to_string(),
    );
    let worker = worker_with(&slack, Arc::new(client));

    worker.run(&modal_payload("see you later")).await;

    let calls = slack.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], SlackCall::UpdateView { view, .. } if view["title"]["text"] == "Error"));
}

#[tokio::test]
async fn test_worker_event_runs_worker() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    let completion = Arc::new(FakeCompletion::replying(log.clone(), "See you soon!"));
    let worker = worker_with(&slack, completion);

    let raw = serde_json::to_value(WorkerEvent::new(modal_payload("see you later"))).unwrap();
    assert_eq!(raw["type"], "rewrite_worker");

    let result = handle_worker_event(&worker, raw).await;
    assert_eq!(result["ok"], true);
    assert_eq!(log.entries(), vec!["complete", "update_view"]);
}

#[tokio::test]
async fn test_malformed_worker_event_is_reported_not_run() {
    let log = CallLog::default();
    let slack = Arc::new(FakeSlack::new(log.clone()));
    let completion = Arc::new(FakeCompletion::replying(log.clone(), "See you soon!"));
    let worker = worker_with(&slack, completion);

    let result = handle_worker_event(&worker, json!({ "type": "rewrite_worker" })).await;
    assert_eq!(result["ok"], false);
    assert!(log.entries().is_empty());
}
