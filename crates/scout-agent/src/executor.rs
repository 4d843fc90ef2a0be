//! Agent loop driving a conversation with tool execution.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::completion::{CompletionRequest, StopReason};
use crate::error::{AgentError, Result};
use crate::messages::Message;
use crate::provider::LlmProvider;
use crate::tool::ToolRegistry;

/// Configuration for an [`AgentExecutor`].
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Upper bound on provider round-trips before giving up.
    pub max_iterations: usize,
    /// Model identifier passed to the provider.
    pub model: String,
    /// System prompt for the conversation.
    pub system_prompt: Option<String>,
    /// Maximum tokens per completion.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: "deepseek-chat".to_string(),
            system_prompt: None,
            max_tokens: 4096,
            temperature: Some(0.7),
        }
    }
}

/// Runs a single agent conversation: sends the history to the provider,
/// executes any requested tools, and feeds results back until the model
/// finishes its turn.
pub struct AgentExecutor {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Create an executor with default configuration.
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>) -> Self {
        Self::with_config(provider, tools, ExecutorConfig::default())
    }

    /// Create an executor with an explicit configuration.
    pub fn with_config(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Run the conversation to completion and return the model's final text.
    pub async fn run(&self, user_message: impl Into<String>) -> Result<String> {
        let mut messages = vec![Message::user(user_message)];

        for iteration in 0..self.config.max_iterations {
            debug!(
                provider = self.provider.name(),
                iteration,
                messages = messages.len(),
                "agent iteration"
            );

            let mut request = CompletionRequest::new(&self.config.model, messages.clone())
                .with_max_tokens(self.config.max_tokens);
            if let Some(system) = &self.config.system_prompt {
                request = request.with_system(system.clone());
            }
            if let Some(temperature) = self.config.temperature {
                request = request.with_temperature(temperature);
            }
            if !self.tools.is_empty() {
                request = request.with_tools(self.tools.definitions());
            }

            let response = self.provider.complete(request).await?;

            match response.stop_reason {
                StopReason::ToolUse => {
                    let tool_uses: Vec<(String, String, Value)> = response
                        .message
                        .tool_uses()
                        .into_iter()
                        .map(|(id, name, input)| {
                            (id.to_string(), name.to_string(), input.clone())
                        })
                        .collect();
                    if tool_uses.is_empty() {
                        return Err(AgentError::UnexpectedResponse(
                            "tool_use stop reason without tool calls".to_string(),
                        ));
                    }
                    messages.push(response.message);
                    for (id, name, input) in tool_uses {
                        messages.push(self.execute_tool(&id, &name, input).await);
                    }
                }
                StopReason::MaxTokens => {
                    warn!("completion hit the token limit");
                    return Ok(response
                        .text()
                        .unwrap_or_else(|| "Response truncated due to token limit".to_string()));
                }
                StopReason::EndTurn => {
                    return Ok(response.text().unwrap_or_default());
                }
            }
        }

        Ok("Max iterations reached without completion".to_string())
    }

    /// Execute one requested tool and wrap the outcome as a result message.
    ///
    /// Failures, including requests for tools that do not exist, are reported
    /// back to the model as error results rather than aborting the run.
    async fn execute_tool(&self, id: &str, name: &str, input: Value) -> Message {
        let Some(tool) = self.tools.get(name) else {
            warn!(tool = name, "model requested unknown tool");
            return Message::tool_error(id, format!("Unknown tool: {name}"));
        };

        debug!(tool = name, "executing tool");
        match tool.execute(input).await {
            Ok(output) => {
                let content = serde_json::to_string(&output)
                    .unwrap_or_else(|_| output.to_string());
                Message::tool_result(id, content)
            }
            Err(err) => {
                warn!(tool = name, error = %err, "tool execution failed");
                Message::tool_error(id, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionResponse, TokenUsage};
    use crate::messages::{ContentBlock, MessageContent, Role};
    use crate::tool::{Tool, schema};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct MockProvider {
        responses: Mutex<VecDeque<CompletionResponse>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockProvider {
        fn new(responses: Vec<CompletionResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AgentError::UnexpectedResponse("mock exhausted".to_string()))
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn text_response(text: &str) -> CompletionResponse {
        CompletionResponse {
            id: "resp".to_string(),
            model: "mock".to_string(),
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    fn tool_response(id: &str, name: &str, input: Value) -> CompletionResponse {
        CompletionResponse {
            id: "resp".to_string(),
            model: "mock".to_string(),
            message: Message {
                role: Role::Assistant,
                content: MessageContent::Blocks(vec![ContentBlock::ToolUse {
                    id: id.to_string(),
                    name: name.to_string(),
                    input,
                }]),
            },
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }

    struct DoubleTool;

    #[async_trait]
    impl Tool for DoubleTool {
        fn name(&self) -> &str {
            "double"
        }

        fn description(&self) -> &str {
            "Double a number"
        }

        fn input_schema(&self) -> Value {
            schema::object([("value", schema::number("Number to double"))], &["value"])
        }

        async fn execute(&self, input: Value) -> Result<Value> {
            let value = input["value"].as_f64().unwrap_or_default();
            Ok(json!(value * 2.0))
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn input_schema(&self) -> Value {
            schema::object([], &[])
        }

        async fn execute(&self, _input: Value) -> Result<Value> {
            Err(AgentError::ToolFailed {
                name: "failing".to_string(),
                message: "storage offline".to_string(),
            })
        }
    }

    fn tool_results(message: &Message) -> Vec<(&str, &str, Option<bool>)> {
        match &message.content {
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::ToolResult {
                        tool_use_id,
                        content,
                        is_error,
                    } => Some((tool_use_id.as_str(), content.as_str(), *is_error)),
                    _ => None,
                })
                .collect(),
            MessageContent::Text(_) => Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_run_returns_text_on_end_turn() {
        let provider = Arc::new(MockProvider::new(vec![text_response("all done")]));
        let registry = Arc::new(ToolRegistry::new());
        let config = ExecutorConfig {
            system_prompt: Some("You are terse.".to_string()),
            ..ExecutorConfig::default()
        };
        let executor = AgentExecutor::with_config(provider.clone(), registry, config);

        let result = executor.run("hello").await.unwrap();
        assert_eq!(result, "all done");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system.as_deref(), Some("You are terse."));
        assert!(requests[0].tools.is_none());
    }

    #[tokio::test]
    async fn test_run_executes_tools_and_feeds_results_back() {
        let provider = Arc::new(MockProvider::new(vec![
            tool_response("call_1", "double", json!({"value": 4})),
            text_response("the answer is 8"),
        ]));
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(DoubleTool));
        let executor = AgentExecutor::new(provider.clone(), registry);

        let result = executor.run("double 4").await.unwrap();
        assert_eq!(result, "the answer is 8");

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        // user, assistant tool call, tool result
        assert_eq!(requests[1].messages.len(), 3);
        let results = tool_results(&requests[1].messages[2]);
        assert_eq!(results, vec![("call_1", "8.0", None)]);
        assert!(requests[1].tools.is_some());
    }

    #[tokio::test]
    async fn test_tool_failure_reported_as_error_result() {
        let provider = Arc::new(MockProvider::new(vec![
            tool_response("call_1", "failing", json!({})),
            text_response("could not complete"),
        ]));
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(FailingTool));
        let executor = AgentExecutor::new(provider.clone(), registry);

        let result = executor.run("try it").await.unwrap();
        assert_eq!(result, "could not complete");

        let requests = provider.requests();
        let results = tool_results(&requests[1].messages[2]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].2, Some(true));
        assert!(results[0].1.contains("storage offline"));
    }

    #[tokio::test]
    async fn test_unknown_tool_reported_to_model() {
        let provider = Arc::new(MockProvider::new(vec![
            tool_response("call_1", "nonexistent", json!({})),
            text_response("recovered"),
        ]));
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(DoubleTool));
        let executor = AgentExecutor::new(provider.clone(), registry);

        let result = executor.run("go").await.unwrap();
        assert_eq!(result, "recovered");

        let requests = provider.requests();
        let results = tool_results(&requests[1].messages[2]);
        assert_eq!(results[0].2, Some(true));
        assert_eq!(results[0].1, "Unknown tool: nonexistent");
    }

    #[tokio::test]
    async fn test_iteration_bound() {
        let provider = Arc::new(MockProvider::new(vec![
            tool_response("call_1", "double", json!({"value": 1})),
            tool_response("call_2", "double", json!({"value": 2})),
            tool_response("call_3", "double", json!({"value": 3})),
        ]));
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(DoubleTool));
        let config = ExecutorConfig {
            max_iterations: 2,
            ..ExecutorConfig::default()
        };
        let executor = AgentExecutor::with_config(provider.clone(), registry, config);

        let result = executor.run("loop forever").await.unwrap();
        assert_eq!(result, "Max iterations reached without completion");
        assert_eq!(provider.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_truncated_response_returns_partial_text() {
        let mut truncated = text_response("the summary was cut");
        truncated.stop_reason = StopReason::MaxTokens;
        let provider = Arc::new(MockProvider::new(vec![truncated]));
        let executor = AgentExecutor::new(provider, Arc::new(ToolRegistry::new()));

        let result = executor.run("summarize").await.unwrap();
        assert_eq!(result, "the summary was cut");
    }
}
