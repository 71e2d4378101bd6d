//! List Notes Tool: filtered, sorted and paged note summaries

use crate::notes::{ListOptions, SortField, SortOrder};
use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolGroup, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use notes_types::ListNotesParams;
use serde_json::{json, Value};
use std::collections::HashMap;

const DEFAULT_LIMIT: usize = 20;

pub struct ListNotesTool {
    definition: ToolDefinition,
}

impl ListNotesTool {
    pub fn new() -> Self {
        let mut properties = HashMap::new();

        properties.insert(
            "tags".to_string(),
            PropertySchema::string_array("Only list notes carrying at least one of these tags"),
        );
        properties.insert(
            "limit".to_string(),
            PropertySchema::integer("Max notes to return (default: 20).", DEFAULT_LIMIT as i64),
        );
        properties.insert(
            "offset".to_string(),
            PropertySchema::integer("Number of notes to skip (default: 0).", 0),
        );
        properties.insert(
            "sort".to_string(),
            PropertySchema::one_of(
                "Sort field",
                &[
                    SortField::Created.as_ref(),
                    SortField::Updated.as_ref(),
                    SortField::Title.as_ref(),
                ],
                SortField::default().as_ref(),
            ),
        );
        properties.insert(
            "order".to_string(),
            PropertySchema::one_of(
                "Sort order",
                &[SortOrder::Asc.as_ref(), SortOrder::Desc.as_ref()],
                SortOrder::default().as_ref(),
            ),
        );

        Self {
            definition: ToolDefinition {
                name: "list_notes".to_string(),
                description: "List notes with optional tag filtering, sorting and paging.".to_string(),
                input_schema: ToolInputSchema {
                    schema_type: "object".to_string(),
                    properties,
                    required: vec![],
                },
                group: ToolGroup::Read,
            },
        }
    }
}

impl Default for ListNotesTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn raw tool parameters into store options, rejecting unknown sort names
fn list_options(params: ListNotesParams) -> Result<ListOptions, String> {
    let sort = match params.sort.as_deref().map(str::trim) {
        None | Some("") => SortField::default(),
        Some(s) => s
            .parse::<SortField>()
            .map_err(|_| format!("Invalid sort field '{}'. Use created, updated or title.", s))?,
    };
    let order = match params.order.as_deref().map(str::trim) {
        None | Some("") => SortOrder::default(),
        Some(o) => o
            .parse::<SortOrder>()
            .map_err(|_| format!("Invalid sort order '{}'. Use asc or desc.", o))?,
    };

    Ok(ListOptions {
        tags: params.tags,
        sort,
        order,
        offset: params.offset.unwrap_or(0),
        limit: Some(params.limit.unwrap_or(DEFAULT_LIMIT)),
    })
}

#[async_trait]
impl Tool for ListNotesTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        // An absent arguments object means "all defaults"
        let params = if params.is_null() { json!({}) } else { params };
        let params: ListNotesParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        let options = match list_options(params) {
            Ok(o) => o,
            Err(e) => return ToolResult::error(e),
        };

        let (total, notes) = match context.notes_store.list_summaries(&options) {
            Ok(page) => page,
            Err(e) => return ToolResult::error(format!("Failed to list notes: {}", e)),
        };

        let metadata = json!({
            "total": total,
            "shown": notes.len(),
            "notes": notes,
        });

        if notes.is_empty() {
            return ToolResult::success("No notes found.").with_metadata(metadata);
        }

        let mut output = format!(
            "Found {} total note(s), showing {}:\n\n",
            total,
            notes.len()
        );
        for note in &notes {
            output.push_str(&format!("**{}**\n", note.title));
            output.push_str(&format!("File: {}\n", note.filename));
            output.push_str(&format!("Summary: {}\n", note.summary));
            if !note.tags.is_empty() {
                output.push_str(&format!("Tags: {}\n", note.tags.join(", ")));
            }
            output.push_str(&format!("Created: {}\n\n", note.created));
        }

        ToolResult::success(output).with_metadata(metadata)
    }
}
