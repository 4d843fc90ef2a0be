//! Error types for the agent layer.

use thiserror::Error;

/// Errors that can occur when talking to an LLM provider or running tools.
#[derive(Error, Debug)]
pub enum AgentError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed - check your API key")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Tool execution failed
    #[error("Tool '{name}' failed: {message}")]
    ToolFailed { name: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Unexpected response structure
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Result type alias for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgentError::AuthenticationFailed;
        assert_eq!(err.to_string(), "Authentication failed - check your API key");

        let err = AgentError::ModelNotFound("gpt-99".to_string());
        assert_eq!(err.to_string(), "Model not found: gpt-99");

        let err = AgentError::ToolFailed {
            name: "get_events".to_string(),
            message: "no events stored".to_string(),
        };
        assert_eq!(err.to_string(), "Tool 'get_events' failed: no events stored");
    }

    #[test]
    fn test_error_from_serde() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AgentError = json_err.into();
        assert!(matches!(err, AgentError::SerializationError(_)));
    }
}
