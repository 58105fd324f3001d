#![allow(dead_code)]

use async_trait::async_trait;
use redraft::ai::CompletionClient;
use redraft::api::Acknowledge;
use redraft::app::{App, Topology};
use redraft::core::config::AppConfig;
use redraft::core::models::UserIdentity;
use redraft::dispatch::WorkerInvoker;
use redraft::errors::BotError;
use redraft::slack::SlackApi;
use openai_api_rs::v1::chat_completion::ChatCompletionMessage;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const RESPONSE_URL: &str = "https://hooks.slack.com/actions/T1/1/abc";

/// Ordered record of every observable step across fakes.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: &str) {
        self.0.lock().unwrap().push(entry.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlackCall {
    OpenView { trigger_id: String, view: Value },
    UpdateView { view_id: String, view: Value },
    Respond { response_url: String, payload: Value },
    UserIdentity { user_id: String },
    PostAsUser {
        channel_id: String,
        text: String,
        username: String,
    },
}

pub struct FakeSlack {
    log: CallLog,
    calls: Mutex<Vec<SlackCall>>,
    pub rendered: Notify,
    pub fail_open: bool,
    pub fail_post: bool,
    pub fail_identity: bool,
}

impl FakeSlack {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            calls: Mutex::new(Vec::new()),
            rendered: Notify::new(),
            fail_open: false,
            fail_post: false,
            fail_identity: false,
        }
    }

    pub fn calls(&self) -> Vec<SlackCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &str, call: SlackCall) {
        self.log.push(name);
        self.calls.lock().unwrap().push(call);
    }

    /// Wait until the worker rendered something, or fail after a second.
    pub async fn wait_rendered(&self) {
        tokio::time::timeout(Duration::from_secs(1), self.rendered.notified())
            .await
            .expect("worker never rendered");
    }
}

#[async_trait]
impl SlackApi for FakeSlack {
    async fn open_view(&self, trigger_id: &str, view: &Value) -> Result<String, BotError> {
        self.record(
            "open_view",
            SlackCall::OpenView {
                trigger_id: trigger_id.to_string(),
                view: view.clone(),
            },
        );
        if self.fail_open {
            return Err(BotError::RenderError("expired_trigger_id".to_string()));
        }
        Ok("V123".to_string())
    }

    async fn update_view(&self, view_id: &str, view: &Value) -> Result<(), BotError> {
        self.record(
            "update_view",
            SlackCall::UpdateView {
                view_id: view_id.to_string(),
                view: view.clone(),
            },
        );
        self.rendered.notify_one();
        Ok(())
    }

    async fn respond(&self, response_url: &str, payload: &Value) -> Result<(), BotError> {
        self.record(
            "respond",
            SlackCall::Respond {
                response_url: response_url.to_string(),
                payload: payload.clone(),
            },
        );
        self.rendered.notify_one();
        Ok(())
    }

    async fn user_identity(&self, user_id: &str) -> Result<UserIdentity, BotError> {
        self.record(
            "user_identity",
            SlackCall::UserIdentity {
                user_id: user_id.to_string(),
            },
        );
        if self.fail_identity {
            return Err(BotError::RenderError("user_not_found".to_string()));
        }
        Ok(UserIdentity {
            name: "ada".to_string(),
            avatar_url: Some("https://avatars.example/72.png".to_string()),
        })
    }

    async fn post_as_user(
        &self,
        channel_id: &str,
        text: &str,
        identity: &UserIdentity,
    ) -> Result<(), BotError> {
        self.record(
            "post_as_user",
            SlackCall::PostAsUser {
                channel_id: channel_id.to_string(),
                text: text.to_string(),
                username: identity.name.clone(),
            },
        );
        if self.fail_post {
            return Err(BotError::RenderError("channel_not_found".to_string()));
        }
        Ok(())
    }
}

/// Completion client answering with a canned suggestion or error.
pub struct FakeCompletion {
    log: CallLog,
    reply: Result<String, String>,
    prompts: Mutex<Vec<Vec<ChatCompletionMessage>>>,
}

impl FakeCompletion {
    pub fn replying(log: CallLog, suggestion: &str) -> Self {
        Self {
            log,
            reply: Ok(suggestion.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(log: CallLog, message: &str) -> Self {
        Self {
            log,
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for FakeCompletion {
    async fn complete(&self, prompt: Vec<ChatCompletionMessage>) -> Result<String, BotError> {
        self.log.push("complete");
        self.prompts.lock().unwrap().push(prompt);
        self.reply.clone().map_err(BotError::CompletionError)
    }
}

/// Acknowledgement that records its response and its place in the call log.
#[derive(Clone)]
pub struct RecordingAck {
    log: CallLog,
    response: Arc<Mutex<Option<Value>>>,
}

impl RecordingAck {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            response: Arc::new(Mutex::new(None)),
        }
    }

    pub fn response(&self) -> Option<Value> {
        self.response.lock().unwrap().clone()
    }

    /// The Slack-facing body of the acknowledged response.
    pub fn body(&self) -> String {
        self.response()
            .and_then(|r| r["body"].as_str().map(ToString::to_string))
            .expect("request was not acknowledged")
    }
}

impl Acknowledge for RecordingAck {
    fn ack(self, response: Value) -> Result<(), BotError> {
        self.log.push("ack");
        *self.response.lock().unwrap() = Some(response);
        Ok(())
    }
}

pub struct FakeInvoker {
    log: CallLog,
    invocations: Mutex<Vec<(String, Value)>>,
    pub fail: bool,
}

impl FakeInvoker {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            invocations: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn invocations(&self) -> Vec<(String, Value)> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkerInvoker for FakeInvoker {
    async fn invoke_event(&self, function_name: &str, payload: Vec<u8>) -> Result<(), BotError> {
        self.log.push("invoke");
        let body: Value = serde_json::from_slice(&payload)?;
        self.invocations
            .lock()
            .unwrap()
            .push((function_name.to_string(), body));
        if self.fail {
            return Err(BotError::AwsError("TooManyRequestsException".to_string()));
        }
        Ok(())
    }
}

pub fn test_config(extra: &[(&str, &str)]) -> AppConfig {
    let mut pairs: Vec<(String, String)> = vec![
        ("SLACK_BOT_TOKEN".to_string(), "xoxb-test".to_string()),
        ("SLACK_SIGNING_SECRET".to_string(), SIGNING_SECRET.to_string()),
        ("OPENAI_API_KEY".to_string(), "sk-test".to_string()),
    ];
    pairs.extend(extra.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));

    AppConfig::from_lookup(|key| {
        pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config")
}

pub fn build_app(
    config: AppConfig,
    slack: &Arc<FakeSlack>,
    completion: &Arc<FakeCompletion>,
    topology: Topology,
) -> App {
    App::new(
        config,
        Arc::clone(slack) as Arc<dyn SlackApi>,
        Arc::clone(completion) as Arc<dyn CompletionClient>,
        topology,
    )
}

/// Form body of a `/rewrite` invocation.
pub fn slash_body(text: &str) -> String {
    let encoded: String = text
        .bytes()
        .map(|b| match b {
            b' ' => "+".to_string(),
            b if b.is_ascii_alphanumeric() => (b as char).to_string(),
            b => format!("%{b:02X}"),
        })
        .collect();
    format!(
        "team_id=T1&channel_id=C1&user_id=U1&user_name=ada&command=%2Frewrite&text={encoded}\
         &response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2FT1%2F1%2Fabc&trigger_id=13345.7890"
    )
}
