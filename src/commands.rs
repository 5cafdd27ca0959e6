//! Command Document loading and validation.
//!
//! The command catalog lives at `commands/commands.json` under the docs root.
//! Mapping order in the source document is preserved end-to-end (`IndexMap` +
//! serde_json's `preserve_order`), so the rendered page lists commands in
//! declaration order, never sorted.

use std::io;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Location of the command catalog, relative to the docs root.
pub const COMMANDS_PATH: &str = "commands/commands.json";

/// Error raised while loading or parsing a Command Document.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The full command catalog.
///
/// Both fields default to empty so a minimal document like `{}` is valid;
/// anything with the wrong *type* (non-object root, non-array description)
/// is a hard [`DocsError::Parse`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommandDocument {
    /// Free-text lines rendered above the per-command sections.
    #[serde(default)]
    pub description: Vec<String>,
    /// Top-level commands, one collapsible section each.
    #[serde(default)]
    pub commands: IndexMap<String, CommandEntry>,
}

/// One top-level command: its own description lines plus named subcommands.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommandEntry {
    /// Lines rendered first in the section body.
    #[serde(default)]
    pub description: Vec<String>,
    /// Subcommand name → description lines, in declaration order.
    #[serde(default)]
    pub commands: IndexMap<String, Vec<String>>,
}

/// Parse a Command Document from JSON text.
///
/// `label` identifies the source (usually a file path) in error messages.
pub fn parse(label: &str, json: &str) -> Result<CommandDocument, DocsError> {
    serde_json::from_str(json).map_err(|source| DocsError::Parse {
        path: label.to_owned(),
        source,
    })
}

/// Read and parse the Command Document at `path` (blocking).
pub fn load(path: &Path) -> Result<CommandDocument, DocsError> {
    let label = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|source| DocsError::Read {
        path: label.clone(),
        source,
    })?;
    parse(&label, &json)
}

/// Read and parse the Command Document at `path` without blocking the runtime.
pub async fn load_async(path: &Path) -> Result<CommandDocument, DocsError> {
    let label = path.display().to_string();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DocsError::Read {
            path: label.clone(),
            source,
        })?;
    parse(&label, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_document_parses() {
        let doc = parse("test", "{}").unwrap();
        assert!(doc.description.is_empty());
        assert!(doc.commands.is_empty());
    }

    #[test]
    fn full_document_parses() {
        let doc = parse(
            "test",
            r#"{
                "description": ["intro line"],
                "commands": {
                    "General": {
                        "description": ["general help"],
                        "commands": {"!info": ["shows info"]}
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(doc.description, vec!["intro line"]);
        let entry = &doc.commands["General"];
        assert_eq!(entry.description, vec!["general help"]);
        assert_eq!(entry.commands["!info"], vec!["shows info"]);
    }

    #[test]
    fn command_order_follows_declaration_order() {
        let doc = parse(
            "test",
            r#"{"commands": {"Zeta": {}, "Alpha": {}, "Mid": {}}}"#,
        )
        .unwrap();
        let names: Vec<&str> = doc.commands.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn subcommand_order_follows_declaration_order() {
        let doc = parse(
            "test",
            r#"{"commands": {"G": {"commands": {"!b": [], "!a": []}}}}"#,
        )
        .unwrap();
        let names: Vec<&str> = doc.commands["G"].commands.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["!b", "!a"]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let doc = parse("test", r#"{"commands": {"G": {}}}"#).unwrap();
        let entry = &doc.commands["G"];
        assert!(entry.description.is_empty());
        assert!(entry.commands.is_empty());
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        let err = parse("cmds.json", r#"["not", "an", "object"]"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("cmds.json"), "error should name the source: {msg}");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(parse("test", "{").is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = std::env::temp_dir().join(format!(
            "cmdocs_missing_{}/commands.json",
            std::process::id()
        ));
        let err = load(&path).unwrap_err();
        assert!(matches!(err, DocsError::Read { .. }));
    }
}
