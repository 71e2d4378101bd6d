//! Shared types for the notes backend and its stdio RPC clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =====================================================
// RPC Request Types
// =====================================================

/// One line of input on the RPC channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Echoed back on the response so clients can correlate replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub call: RpcCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum RpcCall {
    /// Describe every registered tool
    ListTools,
    /// Invoke a tool by name with JSON arguments
    CallTool {
        name: String,
        #[serde(default)]
        arguments: Value,
    },
}

// =====================================================
// RPC Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(id: Option<Value>, data: T) -> Self {
        Self {
            id,
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// =====================================================
// Tool Parameter Types
// =====================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteParams {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub conversation_id: Option<String>,
    pub ai_client: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchNotesParams {
    pub query: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNotesParams {
    #[serde(default)]
    pub tags: Vec<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// One of `created`, `updated`, `title`
    pub sort: Option<String>,
    /// One of `asc`, `desc`
    pub order: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetNoteParams {
    pub filename: String,
}

// =====================================================
// Domain Types
// =====================================================

/// Header fields of one note, as shown in list and search output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub filename: String,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub created: String,
    pub updated: String,
}

/// One ranked search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub filename: String,
    pub score: f64,
    pub summary: String,
    pub tags: Vec<String>,
    pub created: String,
    /// Human-readable explanation per field that contributed to the score
    pub matches: Vec<String>,
}

/// Outcome of a successful create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedNote {
    pub filename: String,
    /// Commit hash, or a `commit_created` / `commit_failed` sentinel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// Full note returned by `get_note`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDetail {
    pub filename: String,
    pub title: String,
    pub created: String,
    pub updated: String,
    pub summary: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_client: Option<String>,
    pub body: String,
    /// Header lines that were skipped while parsing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
