use serde::{Deserialize, Serialize};

/// What the active document knows about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMetadata {
    /// Path of the document on disk, if it has been saved.
    pub file_path: Option<String>,
    /// Raw syntax setting, e.g. `Packages/Python/Python.sublime-syntax`.
    pub syntax: Option<String>,
}

/// The record written to the worker's stdin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Trimmed, never empty.
    pub query: String,
    pub context: String,
    pub file_path: String,
    pub file_syntax: String,
}

/// The record the worker prints on stdout when it exits successfully.
///
/// Every field is optional on the wire; missing ones become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    pub query: String,
    pub response: String,
    pub timestamp: String,
}

/// The user-facing command an invocation originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// "Ask LLM"
    Chat,
    /// "Explain Selected Code"
    Explain,
}

impl CommandKind {
    /// Title given to the result buffer.
    pub fn title(self) -> &'static str {
        match self {
            CommandKind::Chat => "LLM Response",
            CommandKind::Explain => "Code Explanation",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandKind::Chat => write!(f, "chat"),
            CommandKind::Explain => write!(f, "explain"),
        }
    }
}
