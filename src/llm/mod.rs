//! The LLM Adapter: turns a fused prompt and action catalog into one of
//! zero-or-more tool calls, free-form content, or an error, via an
//! OpenAI-compatible chat-completions endpoint (the shape both OpenAI and
//! an Ollama server's `/v1/chat/completions` route understand).

pub mod schema;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::action::{Action, AgentAction};
use crate::config::LlmConfig;
use crate::stop_signal::StopSignal;

/// What one LLM turn produced. Exactly one variant per call — a response
/// with both `tool_calls` and meaningful `content` takes the tool calls,
/// matching `tool_choice = "auto"` semantics where chosen tool calls are
/// the actionable outcome. The LLM may choose more than one action in a
/// single turn; every tool call it returns becomes an `Action`.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmOutcome {
    ToolCalls(Vec<Action>),
    Content(String),
    Error(String),
}

/// A pluggable LLM backend. Implementations own their own HTTP client and
/// request shape; the adapter turns each chosen tool call into an Action
/// (or reports content/an error) per call.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn choose_action(
        &self,
        system_prompt: &str,
        actions: &[AgentAction],
        stop: &StopSignal,
    ) -> LlmOutcome;
}

/// Speaks the OpenAI chat-completions tool-calling protocol:
/// `tools` + `tool_choice = "auto"`, one message, parsed for
/// `tool_calls` vs `content` vs a transport/timeout error.
pub struct OpenAiCompatibleBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
    temperature: Option<f64>,
}

impl OpenAiCompatibleBackend {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434/v1".to_string()),
            api_key: config.api_key.clone(),
            model: config.model.clone().unwrap_or_else(|| "llama3".to_string()),
            timeout: Duration::from_secs_f64(config.timeout.unwrap_or(30.0)),
            temperature: config.temperature,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: ToolCallFunction,
}

#[derive(Deserialize)]
struct ToolCallFunction {
    name: String,
    arguments: String,
}

/// Extract the first argument value from a tool call's `arguments` JSON
/// object, regardless of what key it's under — the function schema always
/// has exactly one parameter, but backends are not required to name it
/// `value`, and some models echo back the action's own name as the key.
fn first_argument_value(raw: &str) -> String {
    let parsed: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => return String::new(),
    };
    let first = match &parsed {
        serde_json::Value::Object(map) => map.values().next().cloned(),
        other => Some(other.clone()),
    };
    match first {
        Some(serde_json::Value::String(s)) => s,
        Some(v) if v.is_null() => String::new(),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

#[async_trait]
impl LlmBackend for OpenAiCompatibleBackend {
    async fn choose_action(
        &self,
        system_prompt: &str,
        actions: &[AgentAction],
        stop: &StopSignal,
    ) -> LlmOutcome {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut body = json!({
            "model": self.model,
            "messages": [{ "role": "system", "content": system_prompt }],
            "tools": schema::build_tool_schemas(actions),
            "tool_choice": "auto",
        });
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        let mut request = self.client.post(&url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = tokio::select! {
            result = tokio::time::timeout(self.timeout, request.send()) => result,
            _ = stop.cancelled() => return LlmOutcome::Error("cancelled by shutdown".to_string()),
        };

        let response = match response {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => return LlmOutcome::Error(format!("request failed: {e}")),
            Err(_) => return LlmOutcome::Error("request timed out".to_string()),
        };

        let parsed: Result<ChatCompletionResponse, _> = response.json().await;
        let parsed = match parsed {
            Ok(p) => p,
            Err(e) => return LlmOutcome::Error(format!("malformed response: {e}")),
        };

        let Some(choice) = parsed.choices.into_iter().next() else {
            return LlmOutcome::Error("no choices in response".to_string());
        };

        if !choice.message.tool_calls.is_empty() {
            let actions = choice
                .message
                .tool_calls
                .into_iter()
                .map(|tool_call| {
                    let value = first_argument_value(&tool_call.function.arguments);
                    Action::new(tool_call.function.name, value)
                })
                .collect();
            return LlmOutcome::ToolCalls(actions);
        }

        match choice.message.content {
            Some(content) => LlmOutcome::Content(content),
            None => LlmOutcome::Error("empty response: no tool call and no content".to_string()),
        }
    }
}
