//! Line-delimited JSON RPC over stdin/stdout
//!
//! Each input line is one `RpcRequest`; each gets exactly one `RpcResponse`
//! line back. Requests are handled one at a time, in order.

use crate::tools::{ToolContext, ToolRegistry};
use notes_types::{RpcCall, RpcRequest, RpcResponse};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub struct RpcServer {
    registry: ToolRegistry,
    context: ToolContext,
}

impl RpcServer {
    pub fn new(registry: ToolRegistry, context: ToolContext) -> Self {
        Self { registry, context }
    }

    /// Handle one request line and return the JSON response line (without newline)
    pub async fn handle_line(&self, line: &str) -> String {
        let response = match serde_json::from_str::<RpcRequest>(line) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                log::warn!("[RPC] Malformed request: {}", e);
                RpcResponse::<Value>::err(None, format!("Invalid request: {}", e))
            }
        };

        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"error":"Failed to encode response: {}"}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }

    async fn dispatch(&self, request: RpcRequest) -> RpcResponse<Value> {
        let id = request.id;
        match request.call {
            RpcCall::ListTools => match serde_json::to_value(self.registry.list()) {
                Ok(tools) => RpcResponse::ok(id, tools),
                Err(e) => RpcResponse::err(id, format!("Failed to encode tools: {}", e)),
            },
            RpcCall::CallTool { name, arguments } => {
                log::info!("[RPC] call_tool {}", name);
                let result = self.registry.execute(&name, arguments, &self.context).await;
                if !result.success {
                    return RpcResponse::err(id, result.content);
                }
                match serde_json::to_value(&result) {
                    Ok(data) => RpcResponse::ok(id, data),
                    Err(e) => RpcResponse::err(id, format!("Failed to encode result: {}", e)),
                }
            }
        }
    }

    /// Serve requests until `input` reaches EOF
    pub async fn serve<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let response = self.handle_line(&line).await;
            output.write_all(response.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        log::info!("[RPC] Input closed, shutting down");
        Ok(())
    }
}
