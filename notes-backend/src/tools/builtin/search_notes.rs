//! Search Notes Tool: relevance-ranked search across all notes

use crate::notes::search;
use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolGroup, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use notes_types::{SearchHit, SearchNotesParams};
use serde_json::{json, Value};
use std::collections::HashMap;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;

pub struct SearchNotesTool {
    definition: ToolDefinition,
}

impl SearchNotesTool {
    pub fn new() -> Self {
        let mut properties = HashMap::new();

        properties.insert(
            "query".to_string(),
            PropertySchema::string(
                "Search query. Matched case-insensitively against filename, summary, content and tags.",
            ),
        );
        properties.insert(
            "tags".to_string(),
            PropertySchema::string_array("Only search notes carrying at least one of these tags"),
        );
        properties.insert(
            "limit".to_string(),
            PropertySchema::integer("Max results (default: 10, max: 50).", DEFAULT_LIMIT as i64),
        );

        Self {
            definition: ToolDefinition {
                name: "search_notes".to_string(),
                description: "Search existing notes with relevance scoring. Returns the best matches first with the matching excerpts.".to_string(),
                input_schema: ToolInputSchema {
                    schema_type: "object".to_string(),
                    properties,
                    required: vec!["query".to_string()],
                },
                group: ToolGroup::Read,
            },
        }
    }
}

impl Default for SearchNotesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SearchNotesTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: SearchNotesParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        let query = params.query.trim();
        if query.is_empty() {
            return ToolResult::error("Query is required.");
        }
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let notes = match context.notes_store.load_all() {
            Ok(notes) => notes,
            Err(e) => return ToolResult::error(format!("Search failed: {}", e)),
        };

        let hits: Vec<SearchHit> = search::search_notes(&notes, query, &params.tags)
            .iter()
            .take(limit)
            .map(|r| r.to_hit())
            .collect();

        if hits.is_empty() {
            return ToolResult::success("No notes found matching your search.")
                .with_metadata(json!({ "query": query, "results": [] }));
        }

        let mut output = format!("Found {} note(s):\n\n", hits.len());
        for hit in &hits {
            output.push_str(&format!("**{}** (score: {:.2})\n", hit.filename, hit.score));
            output.push_str(&format!("Summary: {}\n", hit.summary));
            if !hit.tags.is_empty() {
                output.push_str(&format!("Tags: {}\n", hit.tags.join(", ")));
            }
            output.push_str(&format!("Created: {}\n", hit.created));
            for m in &hit.matches {
                output.push_str(&format!("- {}\n", m));
            }
            output.push('\n');
        }

        ToolResult::success(output).with_metadata(json!({
            "query": query,
            "results": hits,
        }))
    }
}
