//! # File Search
//!
//! Line-oriented keyword search over a text file, served to AI agents
//! through an MCP server on stdio.
//!
//! File Search provides:
//! - **Keyword search** with optional case sensitivity and 1-based line numbers
//! - **MCP server** advertising a single `search_file` tool
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use filesearch::Searcher;
//!
//! let searcher = Searcher::new("/home/me/notes");
//! let report = searcher.search("todo.md", "deadline", false).await?;
//! for m in &report.matches {
//!     println!("{}: {}", m.line_number, m.content);
//! }
//! ```

pub mod config;
pub mod error;
pub mod mcp;
pub mod search;

// Re-exports for convenience
pub use config::{ServerConfig, DEFAULT_SERVER_NAME};
pub use error::{Error, Result};
pub use search::{resolve_path, search_content, MatchRecord, SearchReport, Searcher};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
