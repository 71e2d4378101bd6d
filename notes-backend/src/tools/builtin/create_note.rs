//! Create Note Tool: writes a new note and commits it

use crate::notes::NoteError;
use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolGroup, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use chrono::Utc;
use notes_types::{CreateNoteParams, CreatedNote};
use serde_json::{json, Value};
use std::collections::HashMap;

pub struct CreateNoteTool {
    definition: ToolDefinition,
}

impl CreateNoteTool {
    pub fn new() -> Self {
        let mut properties = HashMap::new();

        properties.insert("title".to_string(), PropertySchema::string("Note title"));
        properties.insert(
            "content".to_string(),
            PropertySchema::string("Note content in markdown"),
        );
        properties.insert(
            "summary".to_string(),
            PropertySchema::string("Brief summary of the note. Default: 'Note about <title>'."),
        );
        properties.insert(
            "tags".to_string(),
            PropertySchema::string_array("Tags for categorization"),
        );
        properties.insert(
            "conversation_id".to_string(),
            PropertySchema::string("ID of the conversation this note relates to"),
        );
        properties.insert(
            "ai_client".to_string(),
            PropertySchema::string("AI client that created the note"),
        );

        Self {
            definition: ToolDefinition {
                name: "create_note".to_string(),
                description: "Create a new markdown note with a metadata header. The note is committed to git when the notes directory is a repository.".to_string(),
                input_schema: ToolInputSchema {
                    schema_type: "object".to_string(),
                    properties,
                    required: vec!["title".to_string(), "content".to_string()],
                },
                group: ToolGroup::Write,
            },
        }
    }
}

impl Default for CreateNoteTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CreateNoteTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: CreateNoteParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        let filename = match context.notes_store.create_note(&params, Utc::now()) {
            Ok(filename) => filename,
            Err(e @ NoteError::Validation(_)) => return ToolResult::error(e.to_string()),
            Err(e) => return ToolResult::error(format!("Failed to create note: {}", e)),
        };

        let commit = match &context.version_control {
            Some(vc) if vc.is_repository().await => {
                Some(vc.commit(&filename, params.title.trim()).await)
            }
            _ => None,
        };

        let git_status = match &commit {
            Some(outcome) if outcome.is_committed() => "committed to git",
            Some(_) => "saved but git commit failed",
            None => "not under version control",
        };

        let created = CreatedNote {
            filename,
            commit: commit.map(|c| c.identifier().to_string()),
        };

        ToolResult::success(format!(
            "Note created successfully: {} ({})",
            created.filename, git_status
        ))
        .with_metadata(json!(created))
    }
}
