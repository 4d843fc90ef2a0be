//! DeepSeek provider speaking the OpenAI-compatible chat completions API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
use crate::error::{AgentError, Result};
use crate::messages::{ContentBlock, Message, MessageContent, Role};
use crate::provider::LlmProvider;

const DEFAULT_API_BASE: &str = "https://api.deepseek.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the DeepSeek provider.
#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    pub api_key: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl DeepSeekConfig {
    /// Create a configuration with the default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Build a configuration from `DEEPSEEK_API_KEY` and optionally
    /// `DEEPSEEK_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("DEEPSEEK_API_KEY").map_err(|_| {
            AgentError::ConfigurationError(
                "DEEPSEEK_API_KEY environment variable not set".to_string(),
            )
        })?;
        let mut config = Self::new(api_key);
        if let Ok(api_base) = std::env::var("DEEPSEEK_API_BASE") {
            config.api_base = api_base;
        }
        Ok(config)
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// LLM provider backed by the DeepSeek API.
pub struct DeepSeekProvider {
    client: reqwest::Client,
    config: DeepSeekConfig,
}

impl DeepSeekProvider {
    /// Create a provider from an explicit configuration.
    pub fn with_config(config: DeepSeekConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a provider with default settings and the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(DeepSeekConfig::new(api_key))
    }

    /// Create a provider configured from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(DeepSeekConfig::from_env()?)
    }

    pub fn config(&self) -> &DeepSeekConfig {
        &self.config
    }
}

#[async_trait]
impl LlmProvider for DeepSeekProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        let body = build_chat_request(&request);
        debug!(
            model = %request.model,
            messages = body.messages.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AgentError::AuthenticationFailed);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let text = response.text().await.unwrap_or_default();
            return Err(AgentError::RateLimitExceeded(text));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AgentError::ModelNotFound(request.model));
        }
        if status == reqwest::StatusCode::BAD_REQUEST {
            let text = response.text().await.unwrap_or_default();
            return Err(AgentError::InvalidRequest(text));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AgentError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let chat: ChatResponse = response.json().await?;
        parse_chat_response(chat)
    }

    fn name(&self) -> &str {
        "deepseek"
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ChatTool>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    tool_calls: Option<Vec<ChatToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatTool {
    #[serde(rename = "type")]
    kind: String,
    function: ChatFunction,
}

#[derive(Debug, Serialize)]
struct ChatFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: ChatFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    id: String,
    model: String,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    }
}

/// Translate a completion request into the chat completions wire format.
fn build_chat_request(request: &CompletionRequest) -> ChatRequest {
    let mut messages = Vec::new();
    if let Some(system) = &request.system {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: Some(system.clone()),
            tool_calls: None,
            tool_call_id: None,
        });
    }
    for message in &request.messages {
        convert_message(message, &mut messages);
    }

    let tools = request.tools.as_ref().map(|tools| {
        tools
            .iter()
            .map(|tool| ChatTool {
                kind: "function".to_string(),
                function: ChatFunction {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: tool.input_schema.clone(),
                },
            })
            .collect()
    });

    ChatRequest {
        model: request.model.clone(),
        messages,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        tools,
    }
}

fn convert_message(message: &Message, out: &mut Vec<ChatMessage>) {
    match &message.content {
        MessageContent::Text(text) => out.push(ChatMessage {
            role: role_name(message.role).to_string(),
            content: Some(text.clone()),
            tool_calls: None,
            tool_call_id: None,
        }),
        MessageContent::Blocks(blocks) => {
            let mut texts = Vec::new();
            let mut tool_calls = Vec::new();
            for block in blocks {
                match block {
                    ContentBlock::Text { text } => texts.push(text.as_str()),
                    ContentBlock::ToolUse { id, name, input } => {
                        let arguments = serde_json::to_string(input)
                            .unwrap_or_else(|_| "{}".to_string());
                        tool_calls.push(ChatToolCall {
                            id: id.clone(),
                            kind: "function".to_string(),
                            function: ChatFunctionCall {
                                name: name.clone(),
                                arguments,
                            },
                        });
                    }
                    ContentBlock::ToolResult {
                        tool_use_id,
                        content,
                        is_error,
                    } => {
                        // Tool results travel as separate role="tool" messages.
                        let content = if *is_error == Some(true) {
                            format!("Error: {content}")
                        } else {
                            content.clone()
                        };
                        out.push(ChatMessage {
                            role: "tool".to_string(),
                            content: Some(content),
                            tool_calls: None,
                            tool_call_id: Some(tool_use_id.clone()),
                        });
                    }
                }
            }
            if !tool_calls.is_empty() || !texts.is_empty() {
                out.push(ChatMessage {
                    role: role_name(message.role).to_string(),
                    content: if texts.is_empty() {
                        None
                    } else {
                        Some(texts.join("\n"))
                    },
                    tool_calls: if tool_calls.is_empty() {
                        None
                    } else {
                        Some(tool_calls)
                    },
                    tool_call_id: None,
                });
            }
        }
    }
}

/// Translate a chat completions response back into provider-neutral types.
fn parse_chat_response(response: ChatResponse) -> Result<CompletionResponse> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        AgentError::UnexpectedResponse("response contained no choices".to_string())
    })?;

    let mut blocks = Vec::new();
    if let Some(content) = choice.message.content {
        if !content.is_empty() {
            blocks.push(ContentBlock::Text { text: content });
        }
    }
    if let Some(calls) = choice.message.tool_calls {
        for call in calls {
            let input =
                serde_json::from_str(&call.function.arguments).unwrap_or(Value::Null);
            blocks.push(ContentBlock::ToolUse {
                id: call.id,
                name: call.function.name,
                input,
            });
        }
    }

    let stop_reason = map_finish_reason(choice.finish_reason.as_deref());
    let usage = response
        .usage
        .map(|usage| TokenUsage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        id: response.id,
        model: response.model,
        message: Message {
            role: Role::Assistant,
            content: MessageContent::Blocks(blocks),
        },
        stop_reason,
        usage,
    })
}

fn map_finish_reason(finish_reason: Option<&str>) -> StopReason {
    match finish_reason {
        Some("length") => StopReason::MaxTokens,
        Some("tool_calls") => StopReason::ToolUse,
        _ => StopReason::EndTurn,
    }
}
