//! File Search MCP Server
//!
//! A Model Context Protocol (MCP) server that exposes keyword search over a
//! single text file to AI agents over stdio transport.
//!
//! ## Usage
//!
//! ```bash
//! # Resolve relative paths against the current directory
//! filesearch-mcp
//!
//! # Resolve relative paths against another directory
//! filesearch-mcp --root /path/to/project
//!
//! # Enable verbose logging
//! filesearch-mcp --verbose
//! ```
//!
//! ## MCP Configuration
//!
//! Add to your MCP client configuration (e.g., Claude Desktop):
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "file-search": {
//!       "command": "filesearch-mcp",
//!       "args": ["--root", "/path/to/project"]
//!     }
//!   }
//! }
//! ```
//!
//! ## Available Tools
//!
//! - **search_file**: Find every line of a file containing a keyword

use anyhow::{Context, Result};
use clap::Parser;
use filesearch::mcp::McpServer;
use filesearch::ServerConfig;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File Search MCP Server - Expose keyword search to AI agents via Model Context Protocol
#[derive(Parser, Debug)]
#[command(name = "filesearch-mcp")]
#[command(
    author,
    version,
    about = "File Search MCP Server - Model Context Protocol interface for keyword search"
)]
struct Args {
    /// Directory relative file paths are resolved against (default: current directory)
    #[arg(long, short = 'r', env = "FILESEARCH_ROOT")]
    root: Option<PathBuf>,

    /// Enable verbose logging (outputs to stderr)
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Explicit log filter directive, e.g. "filesearch=debug"
    #[arg(long, env = "FILESEARCH_LOG")]
    log_filter: Option<String>,
}

impl Args {
    fn env_filter(&self) -> Result<EnvFilter> {
        match &self.log_filter {
            Some(directive) => EnvFilter::try_new(directive)
                .with_context(|| format!("Invalid log filter: {}", directive)),
            None if self.verbose => Ok(EnvFilter::new("debug")),
            None => Ok(EnvFilter::new("info")),
        }
    }

    fn server_config(&self) -> Result<ServerConfig> {
        let config = match &self.root {
            Some(root) => ServerConfig::new(root)?,
            None => ServerConfig::from_current_dir()?,
        };
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging goes to stderr; stdout carries only the MCP protocol
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(args.env_filter()?)
        .init();

    let config = args
        .server_config()
        .context("Failed to configure File Search MCP server")?;

    tracing::info!(
        "Resolving relative paths against {}",
        config.base_dir.display()
    );

    let server = McpServer::new(config);
    tracing::info!("MCP File Search Server running on stdio");

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
