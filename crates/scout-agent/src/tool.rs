//! Tool trait, definitions and registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A callable tool the agent can invoke on behalf of the model.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name, as advertised to the model.
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// JSON schema describing the tool's input object.
    fn input_schema(&self) -> Value;

    /// Execute the tool with the given input.
    async fn execute(&self, input: Value) -> Result<Value>;
}

/// Wire-level description of a tool, sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Registry of tools available to an agent.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name, replacing any previous entry.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Names of all registered tools, sorted.
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Wire definitions for all registered tools, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|tool| {
                ToolDefinition::new(tool.name(), tool.description(), tool.input_schema())
            })
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub fn len(&self) -> usize {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list_tools())
            .finish()
    }
}

/// Helpers for building JSON schemas for tool inputs.
pub mod schema {
    use serde_json::{Value, json};

    /// An object schema with the given properties and required keys.
    pub fn object<const N: usize>(properties: [(&str, Value); N], required: &[&str]) -> Value {
        let props: serde_json::Map<String, Value> = properties
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        json!({
            "type": "object",
            "properties": props,
            "required": required,
        })
    }

    pub fn string(description: &str) -> Value {
        json!({"type": "string", "description": description})
    }

    pub fn number(description: &str) -> Value {
        json!({"type": "number", "description": description})
    }

    pub fn integer(description: &str) -> Value {
        json!({"type": "integer", "description": description})
    }

    pub fn boolean(description: &str) -> Value {
        json!({"type": "boolean", "description": description})
    }

    pub fn array(description: &str, items: Value) -> Value {
        json!({"type": "array", "description": description, "items": items})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn input_schema(&self) -> Value {
            schema::object([("value", schema::string("Value to echo"))], &["value"])
        }

        async fn execute(&self, input: Value) -> Result<Value> {
            Ok(input)
        }
    }

    struct UppercaseTool;

    #[async_trait]
    impl Tool for UppercaseTool {
        fn name(&self) -> &str {
            "uppercase"
        }

        fn description(&self) -> &str {
            "Uppercase a string"
        }

        fn input_schema(&self) -> Value {
            schema::object([("value", schema::string("Value to uppercase"))], &["value"])
        }

        async fn execute(&self, input: Value) -> Result<Value> {
            let value = input["value"].as_str().unwrap_or_default();
            Ok(json!(value.to_uppercase()))
        }
    }

    #[test]
    fn test_registry_register_and_get() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(EchoTool));
        registry.register(Arc::new(UppercaseTool));
        assert_eq!(registry.len(), 2);

        let tool = registry.get("echo").unwrap();
        assert_eq!(tool.description(), "Echo the input back");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registry_lists_sorted() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(UppercaseTool));
        registry.register(Arc::new(EchoTool));

        assert_eq!(registry.list_tools(), vec!["echo", "uppercase"]);

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name, "echo");
        assert_eq!(definitions[1].name, "uppercase");
        assert_eq!(definitions[0].input_schema["type"], "object");
    }

    #[tokio::test]
    async fn test_tool_execution() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(UppercaseTool));

        let tool = registry.get("uppercase").unwrap();
        let output = tool.execute(json!({"value": "tsm"})).await.unwrap();
        assert_eq!(output, json!("TSM"));
    }

    #[test]
    fn test_schema_builders() {
        let schema = schema::object(
            [
                ("ticker", schema::string("Stock ticker symbol")),
                ("days", schema::integer("Days of history")),
            ],
            &["ticker"],
        );
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["ticker"]["type"], "string");
        assert_eq!(schema["properties"]["days"]["type"], "integer");
        assert_eq!(schema["required"], json!(["ticker"]));

        let schema = schema::array("List of events", schema::string("An event"));
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["type"], "string");
    }

    #[test]
    fn test_definition_serialization() {
        let definition = ToolDefinition::new("echo", "Echo the input back", json!({}));
        let value = serde_json::to_value(&definition).unwrap();
        assert_eq!(value["name"], "echo");
        assert_eq!(value["description"], "Echo the input back");
    }
}
