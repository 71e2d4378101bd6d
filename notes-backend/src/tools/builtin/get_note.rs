//! Get Note Tool: full content of one note

use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolGroup, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use notes_types::GetNoteParams;
use serde_json::{json, Value};
use std::collections::HashMap;

pub struct GetNoteTool {
    definition: ToolDefinition,
}

impl GetNoteTool {
    pub fn new() -> Self {
        let mut properties = HashMap::new();

        properties.insert(
            "filename".to_string(),
            PropertySchema::string("Note filename relative to the notes directory, e.g. 'trip-notes-2024-06-01.md'."),
        );

        Self {
            definition: ToolDefinition {
                name: "get_note".to_string(),
                description: "Retrieve the complete content and metadata of a note by filename.".to_string(),
                input_schema: ToolInputSchema {
                    schema_type: "object".to_string(),
                    properties,
                    required: vec!["filename".to_string()],
                },
                group: ToolGroup::Read,
            },
        }
    }
}

impl Default for GetNoteTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GetNoteTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: GetNoteParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };
        let filename = params.filename.trim();

        let note = match context.notes_store.read(filename) {
            Ok(Some(note)) => note,
            Ok(None) => {
                return ToolResult::success(format!("Note not found: {}", filename))
                    .with_metadata(json!({ "found": false, "filename": filename }));
            }
            Err(e) => return ToolResult::error(format!("Failed to read note: {}", e)),
        };

        let detail = note.detail();
        let mut output = format!("# {}\n\n", detail.title);
        output.push_str(&format!("**File:** {}\n", detail.filename));
        output.push_str(&format!("**Created:** {}\n", detail.created));
        output.push_str(&format!("**Updated:** {}\n", detail.updated));
        output.push_str(&format!("**Summary:** {}\n", detail.summary));
        if !detail.tags.is_empty() {
            output.push_str(&format!("**Tags:** {}\n", detail.tags.join(", ")));
        }
        if let Some(conversation_id) = &detail.conversation_id {
            output.push_str(&format!("**Conversation:** {}\n", conversation_id));
        }
        if let Some(ai_client) = &detail.ai_client {
            output.push_str(&format!("**AI client:** {}\n", ai_client));
        }
        output.push_str("\n---\n\n");
        output.push_str(&detail.body);

        ToolResult::success(output).with_metadata(json!({
            "found": true,
            "note": detail,
        }))
    }
}
