//! MCP (Model Context Protocol) server for File Search
//!
//! This module implements an MCP server using stdio transport, exposing
//! single-file keyword search to AI agents.
//!
//! ## Tools Exposed
//!
//! - `search_file` - find every line of a file containing a keyword
//!
//! ## Usage
//!
//! ```rust,ignore
//! use filesearch::{mcp::McpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::from_current_dir().unwrap();
//!     McpServer::new(config).run().await.unwrap();
//! }
//! ```

pub mod dispatcher;
mod protocol;
pub mod registry;
mod server;

pub use dispatcher::{Dispatcher, ErrorDescriptor, InvocationRequest, ToolError, ToolOutput};
pub use protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolContent, ToolResult, MCP_PROTOCOL_VERSION,
};
pub use registry::{Capability, CapabilityDescriptor, CapabilityRegistry};
pub use server::McpServer;
