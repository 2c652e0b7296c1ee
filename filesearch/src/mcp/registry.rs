//! Capability registry
//!
//! Holds the static description of every tool the server offers. The
//! argument schema here is descriptive metadata; the dispatcher is what
//! enforces it.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Every tool the server can execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Keyword search over one file
    SearchFile,
}

impl Capability {
    /// All capabilities, in advertised order
    pub const ALL: [Capability; 1] = [Capability::SearchFile];

    /// Stable tool name
    pub fn name(self) -> &'static str {
        match self {
            Capability::SearchFile => "search_file",
        }
    }

    /// Build the descriptor advertised for this capability
    pub fn descriptor(self) -> CapabilityDescriptor {
        match self {
            Capability::SearchFile => CapabilityDescriptor {
                name: self.name().to_string(),
                description: "Search for a keyword in a specified file and return all matching lines with line numbers".to_string(),
                input_schema: ArgumentSchema::new(vec![
                    ArgumentSpec::required(
                        "filePath",
                        ArgumentKind::String,
                        "Absolute or relative path to the file to search",
                    ),
                    ArgumentSpec::required(
                        "keyword",
                        ArgumentKind::String,
                        "The keyword to search for in the file",
                    ),
                    ArgumentSpec::optional(
                        "caseSensitive",
                        ArgumentKind::Boolean,
                        "Whether the search should be case-sensitive (default: false)",
                        json!(false),
                    ),
                ]),
            },
        }
    }
}

/// JSON type of an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    String,
    Boolean,
}

impl ArgumentKind {
    /// JSON Schema type name
    pub fn as_str(self) -> &'static str {
        match self {
            ArgumentKind::String => "string",
            ArgumentKind::Boolean => "boolean",
        }
    }

    /// Whether `value` has this JSON type
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ArgumentKind::String => value.is_string(),
            ArgumentKind::Boolean => value.is_boolean(),
        }
    }
}

/// One named argument of a capability
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub kind: ArgumentKind,
    pub description: &'static str,
    pub required: bool,
    /// Value used when an optional argument is absent
    pub default: Option<Value>,
}

impl ArgumentSpec {
    /// A required argument without default
    pub fn required(name: &'static str, kind: ArgumentKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: true,
            default: None,
        }
    }

    /// An optional argument with a default
    pub fn optional(
        name: &'static str,
        kind: ArgumentKind,
        description: &'static str,
        default: Value,
    ) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            default: Some(default),
        }
    }
}

/// Ordered set of arguments; serializes as a JSON Schema object
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSchema {
    arguments: Vec<ArgumentSpec>,
}

impl ArgumentSchema {
    pub fn new(arguments: Vec<ArgumentSpec>) -> Self {
        Self { arguments }
    }

    /// All arguments, in declaration order
    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    /// Look up an argument by name
    pub fn get(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Arguments that must be present and non-empty
    pub fn required(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments.iter().filter(|a| a.required)
    }

    /// Render as a JSON Schema object
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for arg in &self.arguments {
            let mut property = json!({
                "type": arg.kind.as_str(),
                "description": arg.description,
            });
            if let Some(default) = &arg.default {
                property["default"] = default.clone();
            }
            properties.insert(arg.name.to_string(), property);
        }

        let required: Vec<&str> = self.required().map(|a| a.name).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl Serialize for ArgumentSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_schema().serialize(serializer)
    }
}

/// Advertised description of a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityDescriptor {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Input schema (JSON Schema)
    pub input_schema: ArgumentSchema,
}

/// A capability together with its descriptor
#[derive(Debug, Clone)]
pub struct RegisteredCapability {
    pub capability: Capability,
    pub descriptor: CapabilityDescriptor,
}

/// Fixed table of capabilities, built once at startup
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    entries: Vec<RegisteredCapability>,
}

impl CapabilityRegistry {
    /// Registry of every built-in capability
    pub fn new() -> Self {
        let entries = Capability::ALL
            .iter()
            .map(|&capability| RegisteredCapability {
                capability,
                descriptor: capability.descriptor(),
            })
            .collect();
        Self { entries }
    }

    /// Descriptors in advertised order
    pub fn list_capabilities(&self) -> Vec<&CapabilityDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Find a capability by tool name
    pub fn lookup(&self, name: &str) -> Option<&RegisteredCapability> {
        self.entries.iter().find(|e| e.descriptor.name == name)
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
