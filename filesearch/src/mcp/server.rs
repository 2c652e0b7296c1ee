//! MCP server implementation
//!
//! Implements the stdio transport for the Model Context Protocol: one
//! JSON-RPC message per line in, one response per line out. Requests are
//! handled strictly one at a time.

use super::dispatcher::{Dispatcher, InvocationRequest};
use super::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    MCP_PROTOCOL_VERSION,
};
use super::registry::CapabilityRegistry;
use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::search::Searcher;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// MCP server for File Search
///
/// Explicitly constructed server context: owns the configuration and the
/// dispatcher, and is handed to the transport loop by [`McpServer::run`].
pub struct McpServer {
    config: ServerConfig,
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new MCP server from a configuration
    pub fn new(config: ServerConfig) -> Self {
        let searcher = Searcher::new(config.base_dir.clone());
        let dispatcher = Dispatcher::new(CapabilityRegistry::new(), searcher);
        Self { config, dispatcher }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the MCP server on stdio
    ///
    /// Handles requests until EOF is received on stdin.
    pub async fn run(&self) -> Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, answering on `writer`.
    ///
    /// Returns `Ok` on EOF or when the input stream fails, and
    /// [`Error::Transport`] when a response cannot be written.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(
            "{} {} started (protocol version {})",
            self.config.name,
            self.config.version,
            MCP_PROTOCOL_VERSION
        );

        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => {
                    tracing::info!("EOF received, shutting down");
                    break;
                }
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    tracing::debug!("Received: {}", line);

                    if let Some(response) = self.handle_line(line).await {
                        let response_json = serde_json::to_string(&response)?;
                        write_line(&mut writer, &response_json).await?;
                        tracing::debug!("Sent: {}", response_json);
                    }
                }
                Err(e) => {
                    tracing::error!("Read error: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handle one raw line; `None` means nothing is sent back
    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Unparsable message: {}", e);
                return Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                ));
            }
        };

        let id = value.get("id").cloned().filter(|id| !id.is_null());
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Invalid request: {}", e);
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
                ));
            }
        };

        if request.is_notification() {
            tracing::debug!("Notification: {}", request.method);
            return None;
        }

        Some(self.handle_request(request).await)
    }

    /// Handle a single JSON-RPC request
    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(&request.params),
            "notifications/initialized" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(&request.params).await,
            "ping" => Ok(json!({})),
            _ => Err(JsonRpcError::method_not_found(&request.method)),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(error) => JsonRpcResponse::error(request.id, error),
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, _params: &Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let capabilities = ServerCapabilities::default();
        let server_info = ServerInfo::from(&self.config);

        Ok(json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": capabilities,
            "serverInfo": server_info
        }))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> std::result::Result<Value, JsonRpcError> {
        let tools = self.dispatcher.registry().list_capabilities();
        Ok(json!({ "tools": tools }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, params: &Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let invocation = InvocationRequest::from_params(params.as_ref())?;
        let result = self.dispatcher.handle_invocation(&invocation).await;

        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<()> {
    let transport = |e: std::io::Error| Error::Transport(e.to_string());
    writer.write_all(line.as_bytes()).await.map_err(transport)?;
    writer.write_all(b"\n").await.map_err(transport)?;
    writer.flush().await.map_err(transport)
}
