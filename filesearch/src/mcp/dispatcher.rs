//! Tool call dispatch
//!
//! Validates an invocation against the capability registry, routes it to the
//! handler bound to the tool name and wraps the outcome in a [`ToolResult`].
//! Every failure past this point becomes an error envelope; nothing escapes
//! as a protocol error.

use super::protocol::{JsonRpcError, ToolResult};
use super::registry::{ArgumentSchema, Capability, CapabilityRegistry};
use crate::search::{SearchReport, Searcher};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A single `tools/call` invocation
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    /// Requested tool name
    pub name: String,
    /// Named arguments
    pub arguments: Map<String, Value>,
}

impl InvocationRequest {
    /// Create a request from a name and argument map
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Read a request out of `tools/call` params.
    ///
    /// Missing `arguments` (or `null`) is an empty map. A missing name or a
    /// non-object `arguments` is a malformed call, not a tool failure.
    pub fn from_params(params: Option<&Value>) -> Result<Self, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tool name"))?;

        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => {
                return Err(JsonRpcError::invalid_params(
                    "Tool arguments must be an object",
                ))
            }
        };

        Ok(Self::new(name, arguments))
    }
}

/// Why a tool call failed
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownCapability(String),

    /// A required argument was absent, null or empty
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// An argument was supplied with the wrong JSON type
    #[error("Invalid argument {name}: expected {expected}")]
    InvalidArgument {
        name: &'static str,
        expected: &'static str,
    },

    /// The file could not be accessed or read
    #[error("{source}")]
    FileRead {
        /// Path as supplied by the caller
        file_path: String,
        /// Keyword as supplied by the caller
        keyword: String,
        source: crate::Error,
    },
}

impl ToolError {
    /// Short name of the failure kind, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::UnknownCapability(_) => "UnknownCapability",
            ToolError::MissingArgument(_) => "MissingArgument",
            ToolError::InvalidArgument { .. } => "InvalidArgument",
            ToolError::FileRead { .. } => "FileReadError",
        }
    }
}

/// Error payload placed in the envelope text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    /// Failure message
    pub error: String,
    /// Requested path, echoed for search failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Requested keyword, echoed for search failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl From<&ToolError> for ErrorDescriptor {
    fn from(err: &ToolError) -> Self {
        match err {
            ToolError::FileRead {
                file_path, keyword, ..
            } => ErrorDescriptor {
                error: err.to_string(),
                file_path: Some(file_path.clone()),
                keyword: Some(keyword.clone()),
            },
            _ => ErrorDescriptor {
                error: err.to_string(),
                file_path: None,
                keyword: None,
            },
        }
    }
}

/// Successful output of a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    SearchFile(SearchReport),
}

/// Validated arguments of `search_file`
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchFileArgs {
    file_path: String,
    keyword: String,
    case_sensitive: bool,
}

impl SearchFileArgs {
    /// Extract typed arguments; `args` must already have passed [`validate`]
    fn from_arguments(schema: &ArgumentSchema, args: &Map<String, Value>) -> Self {
        Self {
            file_path: string_arg(args, "filePath"),
            keyword: string_arg(args, "keyword"),
            case_sensitive: bool_arg(schema, args, "caseSensitive"),
        }
    }
}

/// Check `args` against `schema`.
///
/// Missing required arguments are reported before type mismatches, so a call
/// lacking `keyword` is always a `MissingArgument` whatever else it carries.
fn validate(schema: &ArgumentSchema, args: &Map<String, Value>) -> Result<(), ToolError> {
    for spec in schema.required() {
        let missing = match args.get(spec.name) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if missing {
            return Err(ToolError::MissingArgument(spec.name));
        }
    }

    for spec in schema.arguments() {
        match args.get(spec.name) {
            None | Some(Value::Null) => {}
            Some(value) if spec.kind.accepts(value) => {}
            Some(_) => {
                return Err(ToolError::InvalidArgument {
                    name: spec.name,
                    expected: spec.kind.as_str(),
                })
            }
        }
    }

    Ok(())
}

fn string_arg(args: &Map<String, Value>, name: &str) -> String {
    args.get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Boolean argument, falling back to the schema default when absent or null
fn bool_arg(schema: &ArgumentSchema, args: &Map<String, Value>, name: &str) -> bool {
    args.get(name)
        .and_then(Value::as_bool)
        .or_else(|| {
            schema
                .get(name)
                .and_then(|spec| spec.default.as_ref())
                .and_then(Value::as_bool)
        })
        .unwrap_or(false)
}

/// Routes tool calls to their handlers
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: CapabilityRegistry,
    searcher: Searcher,
}

impl Dispatcher {
    /// Create a dispatcher over `registry`, searching with `searcher`
    pub fn new(registry: CapabilityRegistry, searcher: Searcher) -> Self {
        Self { registry, searcher }
    }

    /// The registry this dispatcher validates against
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Validate and execute `request`
    pub async fn dispatch(&self, request: &InvocationRequest) -> Result<ToolOutput, ToolError> {
        let entry = self
            .registry
            .lookup(&request.name)
            .ok_or_else(|| ToolError::UnknownCapability(request.name.clone()))?;

        let schema = &entry.descriptor.input_schema;
        validate(schema, &request.arguments)?;

        match entry.capability {
            Capability::SearchFile => {
                let args = SearchFileArgs::from_arguments(schema, &request.arguments);
                self.search_file(args).await.map(ToolOutput::SearchFile)
            }
        }
    }

    /// Execute `request` and wrap the outcome in a response envelope
    pub async fn handle_invocation(&self, request: &InvocationRequest) -> ToolResult {
        match self.dispatch(request).await {
            Ok(output) => match serde_json::to_string_pretty(&output) {
                Ok(text) => ToolResult::text(text),
                Err(e) => {
                    tracing::error!("Failed to serialize {} result: {}", request.name, e);
                    error_envelope(&ErrorDescriptor {
                        error: e.to_string(),
                        file_path: None,
                        keyword: None,
                    })
                }
            },
            Err(err) => {
                tracing::warn!(kind = err.kind(), "Tool {} failed: {}", request.name, err);
                error_envelope(&ErrorDescriptor::from(&err))
            }
        }
    }

    async fn search_file(&self, args: SearchFileArgs) -> Result<SearchReport, ToolError> {
        self.searcher
            .search(&args.file_path, &args.keyword, args.case_sensitive)
            .await
            .map_err(|source| ToolError::FileRead {
                file_path: args.file_path,
                keyword: args.keyword,
                source,
            })
    }
}

fn error_envelope(descriptor: &ErrorDescriptor) -> ToolResult {
    let text = serde_json::to_string_pretty(descriptor).unwrap_or_else(|_| descriptor.error.clone());
    ToolResult::error(text)
}
