//! Inference inputs and outputs as stored alongside evaluation results.
//!
//! Content blocks are closed sum types keyed on their `type` tag. A tag this
//! crate does not know about deserializes into the `Other` arm with the raw
//! JSON kept intact, so newer producers never break the comparison view.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

// ===== Input =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Input {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<Value>,
    #[serde(default)]
    pub messages: Vec<InputMessage>,
}

impl Input {
    pub fn new(messages: Vec<InputMessage>) -> Self {
        Self {
            system: None,
            messages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Vec<InputContent>,
}

impl InputMessage {
    pub fn new(role: Role, content: Vec<InputContent>) -> Self {
        Self { role, content }
    }
}

/// One content block of an input message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "Value", into = "Value")]
pub enum InputContent {
    /// Templated text; `arguments` are the template variables.
    StructuredText { arguments: Value },
    UnstructuredText { text: String },
    /// Text sent to a function that declares no template for it.
    MissingFunctionText { value: String },
    RawText { value: String },
    ToolCall { name: String, arguments: Value },
    ToolResult { name: String, result: String },
    Thought { text: String },
    Other { kind: String, raw: Value },
}

impl InputContent {
    /// The declared `type` tag of this block.
    pub fn kind(&self) -> &str {
        match self {
            InputContent::StructuredText { .. } => "structured_text",
            InputContent::UnstructuredText { .. } => "unstructured_text",
            InputContent::MissingFunctionText { .. } => "missing_function_text",
            InputContent::RawText { .. } => "raw_text",
            InputContent::ToolCall { .. } => "tool_call",
            InputContent::ToolResult { .. } => "tool_result",
            InputContent::Thought { .. } => "thought",
            InputContent::Other { kind, .. } => kind,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        InputContent::UnstructuredText { text: text.into() }
    }
}

impl From<Value> for InputContent {
    fn from(value: Value) -> Self {
        let kind = type_tag(&value);
        let parsed = match kind.as_str() {
            "structured_text" => value
                .get("arguments")
                .cloned()
                .map(|arguments| InputContent::StructuredText { arguments }),
            "unstructured_text" => {
                string_field(&value, "text").map(|text| InputContent::UnstructuredText { text })
            }
            "missing_function_text" => string_field(&value, "value")
                .map(|value| InputContent::MissingFunctionText { value }),
            "raw_text" => {
                string_field(&value, "value").map(|value| InputContent::RawText { value })
            }
            "tool_call" => string_field(&value, "name").map(|name| InputContent::ToolCall {
                name,
                arguments: value.get("arguments").cloned().unwrap_or(Value::Null),
            }),
            "tool_result" => string_field(&value, "name").map(|name| InputContent::ToolResult {
                name,
                result: string_field(&value, "result").unwrap_or_default(),
            }),
            "thought" => string_field(&value, "text").map(|text| InputContent::Thought { text }),
            _ => None,
        };
        parsed.unwrap_or(InputContent::Other { kind, raw: value })
    }
}

impl From<InputContent> for Value {
    fn from(content: InputContent) -> Self {
        match content {
            InputContent::StructuredText { arguments } => {
                json!({ "type": "structured_text", "arguments": arguments })
            }
            InputContent::UnstructuredText { text } => {
                json!({ "type": "unstructured_text", "text": text })
            }
            InputContent::MissingFunctionText { value } => {
                json!({ "type": "missing_function_text", "value": value })
            }
            InputContent::RawText { value } => json!({ "type": "raw_text", "value": value }),
            InputContent::ToolCall { name, arguments } => {
                json!({ "type": "tool_call", "name": name, "arguments": arguments })
            }
            InputContent::ToolResult { name, result } => {
                json!({ "type": "tool_result", "name": name, "result": result })
            }
            InputContent::Thought { text } => json!({ "type": "thought", "text": text }),
            InputContent::Other { raw, .. } => raw,
        }
    }
}

// ===== Output =====

/// One content block of a chat output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "Value", into = "Value")]
pub enum ContentBlockOutput {
    Text { text: String },
    ToolCall { name: String, raw_arguments: String },
    Thought { text: String },
    Other { kind: String, raw: Value },
}

impl ContentBlockOutput {
    pub fn kind(&self) -> &str {
        match self {
            ContentBlockOutput::Text { .. } => "text",
            ContentBlockOutput::ToolCall { .. } => "tool_call",
            ContentBlockOutput::Thought { .. } => "thought",
            ContentBlockOutput::Other { kind, .. } => kind,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        ContentBlockOutput::Text { text: text.into() }
    }
}

impl From<Value> for ContentBlockOutput {
    fn from(value: Value) -> Self {
        let kind = type_tag(&value);
        let parsed = match kind.as_str() {
            "text" => string_field(&value, "text").map(|text| ContentBlockOutput::Text { text }),
            "tool_call" => {
                string_field(&value, "name").map(|name| ContentBlockOutput::ToolCall {
                    name,
                    raw_arguments: string_field(&value, "raw_arguments").unwrap_or_default(),
                })
            }
            "thought" => {
                string_field(&value, "text").map(|text| ContentBlockOutput::Thought { text })
            }
            _ => None,
        };
        parsed.unwrap_or(ContentBlockOutput::Other { kind, raw: value })
    }
}

impl From<ContentBlockOutput> for Value {
    fn from(block: ContentBlockOutput) -> Self {
        match block {
            ContentBlockOutput::Text { text } => json!({ "type": "text", "text": text }),
            ContentBlockOutput::ToolCall {
                name,
                raw_arguments,
            } => json!({ "type": "tool_call", "name": name, "raw_arguments": raw_arguments }),
            ContentBlockOutput::Thought { text } => json!({ "type": "thought", "text": text }),
            ContentBlockOutput::Other { raw, .. } => raw,
        }
    }
}

/// Output of a JSON function: the raw model text and its parsed form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JsonInferenceOutput {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub parsed: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Output {
    Chat(Vec<ContentBlockOutput>),
    Json(JsonInferenceOutput),
}

impl Default for Output {
    fn default() -> Self {
        Output::Chat(Vec::new())
    }
}

fn type_tag(value: &Value) -> String {
    value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
