//! LLM agent layer for stockscout.
//!
//! Provides the [`LlmProvider`] abstraction with a DeepSeek implementation,
//! a [`ToolRegistry`] of callable tools, the [`AgentExecutor`] loop that
//! drives a single agent conversation, and the [`AgentWorkflow`] that chains
//! several agent steps over a shared tool set.

pub mod completion;
pub mod deepseek;
pub mod error;
pub mod executor;
pub mod messages;
pub mod provider;
pub mod tool;
pub mod workflow;

pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use deepseek::{DeepSeekConfig, DeepSeekProvider};
pub use error::{AgentError, Result};
pub use executor::{AgentExecutor, ExecutorConfig};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LlmProvider;
pub use tool::{Tool, ToolDefinition, ToolRegistry};
pub use workflow::{AgentWorkflow, WorkflowStep};
