use crate::tools::builtin;
use crate::tools::types::{ToolContext, ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult;

    fn name(&self) -> String {
        self.definition().name
    }
}

/// Tools addressable by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four note tools
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(builtin::CreateNoteTool::new()));
        registry.register(Arc::new(builtin::SearchNotesTool::new()));
        registry.register(Arc::new(builtin::ListNotesTool::new()));
        registry.register(Arc::new(builtin::GetNoteTool::new()));
        registry
    }

    /// Add a tool, replacing any tool already registered under its name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name();
        if self.tools.insert(name.clone(), tool).is_some() {
            log::warn!("[TOOLS] Replaced existing tool: {}", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Definitions of every registered tool, sorted by name
    pub fn list(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.values().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub async fn execute(&self, name: &str, params: Value, context: &ToolContext) -> ToolResult {
        match self.get(name) {
            Some(tool) => {
                log::debug!("[TOOLS] Executing {}", name);
                tool.execute(params, context).await
            }
            None => ToolResult::error(format!("Unknown tool: {}", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::NoteStore;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_tools_sorted_by_name() {
        let registry = ToolRegistry::with_builtin_tools();
        let names: Vec<String> = registry.list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["create_note", "get_note", "list_notes", "search_notes"]);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error_result() {
        let dir = tempdir().unwrap();
        let context = ToolContext::new(Arc::new(NoteStore::new(dir.path())));
        let registry = ToolRegistry::with_builtin_tools();

        let result = registry.execute("delete_note", json!({}), &context).await;
        assert!(!result.success);
        assert!(result.content.contains("Unknown tool: delete_note"));
    }
}
