//! Multi-step agent workflows over a shared tool set.

use std::sync::Arc;

use tracing::info;

use crate::error::{AgentError, Result};
use crate::executor::{AgentExecutor, ExecutorConfig};
use crate::provider::LlmProvider;
use crate::tool::ToolRegistry;

/// One step of a workflow, giving the agent a role for that phase.
#[derive(Debug, Clone)]
pub struct WorkflowStep {
    /// Step name, used in logs.
    pub name: String,
    /// System prompt for this step.
    pub system_prompt: String,
}

impl WorkflowStep {
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
        }
    }
}

/// Runs a sequence of agent steps against the same provider and tools.
///
/// Every step receives the same user message; intermediate state flows
/// between steps through the tools they share. The output of the final
/// step is the workflow result.
pub struct AgentWorkflow {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: ExecutorConfig,
    steps: Vec<WorkflowStep>,
}

impl AgentWorkflow {
    /// Create a workflow with default executor configuration.
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>) -> Self {
        Self::with_config(provider, tools, ExecutorConfig::default())
    }

    /// Create a workflow with an explicit base configuration.
    ///
    /// Each step replaces the configuration's system prompt with its own.
    pub fn with_config(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
            steps: Vec::new(),
        }
    }

    /// Append a step to the workflow.
    #[must_use]
    pub fn add_step(mut self, step: WorkflowStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    /// Run all steps in order and return the final step's output.
    pub async fn run(&self, user_message: impl Into<String>) -> Result<String> {
        if self.steps.is_empty() {
            return Err(AgentError::ConfigurationError(
                "workflow has no steps".to_string(),
            ));
        }

        let user_message = user_message.into();
        let mut output = String::new();
        for step in &self.steps {
            info!(step = %step.name, "running workflow step");
            let mut config = self.config.clone();
            config.system_prompt = Some(step.system_prompt.clone());
            let executor =
                AgentExecutor::with_config(self.provider.clone(), self.tools.clone(), config);
            output = executor.run(user_message.clone()).await?;
        }
        Ok(output)
    }
}
