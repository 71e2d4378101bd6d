use crate::git::VersionControl;
use crate::notes::NoteStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// JSON-schema description of one tool parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Element schema for `array` parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropertySchema {
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            schema_type: "string".to_string(),
            description: description.into(),
            default: None,
            items: None,
            enum_values: None,
        }
    }

    pub fn integer(description: impl Into<String>, default: i64) -> Self {
        Self {
            schema_type: "integer".to_string(),
            description: description.into(),
            default: Some(Value::from(default)),
            items: None,
            enum_values: None,
        }
    }

    pub fn string_array(description: impl Into<String>) -> Self {
        Self {
            schema_type: "array".to_string(),
            description: description.into(),
            default: None,
            items: Some(Box::new(Self::string("A single entry"))),
            enum_values: None,
        }
    }

    pub fn one_of(description: impl Into<String>, values: &[&str], default: &str) -> Self {
        Self {
            schema_type: "string".to_string(),
            description: description.into(),
            default: Some(Value::from(default)),
            items: None,
            enum_values: Some(values.iter().map(|v| v.to_string()).collect()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: HashMap<String, PropertySchema>,
    #[serde(default)]
    pub required: Vec<String>,
}

/// Whether a tool only reads the store or also writes to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolGroup {
    Read,
    Write,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
    pub group: ToolGroup,
}

/// Outcome of a tool call: human-readable text plus optional structured data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            metadata: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            content: message.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Shared state handed to every tool call
#[derive(Clone)]
pub struct ToolContext {
    pub notes_store: Arc<NoteStore>,
    /// `None` when git is disabled
    pub version_control: Option<Arc<dyn VersionControl>>,
}

impl ToolContext {
    pub fn new(notes_store: Arc<NoteStore>) -> Self {
        Self {
            notes_store,
            version_control: None,
        }
    }

    pub fn with_version_control(mut self, version_control: Arc<dyn VersionControl>) -> Self {
        self.version_control = Some(version_control);
        self
    }
}
