//! Resource files: flat JSON objects of UI strings.
//!
//! Keys keep their source order (serde_json is built with `preserve_order`).
//! Values take one of three shapes, see [`EntryValue`].

use crate::error::SyncError;
use serde_json::{Map, Value};
use std::path::Path;

/// One parsed resource file.
pub type ResourceMap = Map<String, Value>;

/// Field holding the text of a Docusaurus message descriptor
const MESSAGE_FIELD: &str = "message";

/// How a resource value is handled during translation.
#[derive(Debug, PartialEq, Eq)]
pub enum EntryValue<'a> {
    /// A plain string, translated as a whole.
    Text(&'a str),

    /// A Docusaurus descriptor (`{"message": ..., "description": ...}`).
    /// Only `message` is translated.
    Message(&'a str),

    /// Anything else, copied unchanged.
    Opaque,
}

impl<'a> EntryValue<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(text) => EntryValue::Text(text),
            Value::Object(fields) => match fields.get(MESSAGE_FIELD) {
                Some(Value::String(message)) => EntryValue::Message(message),
                _ => EntryValue::Opaque,
            },
            _ => EntryValue::Opaque,
        }
    }
}

/// Rebuild `original` with its translatable text replaced by `translated`.
///
/// Opaque values are returned unchanged.
pub fn replace_text(original: &Value, translated: String) -> Value {
    match original {
        Value::String(_) => Value::String(translated),
        Value::Object(fields) if fields.get(MESSAGE_FIELD).is_some_and(Value::is_string) => {
            let mut fields = fields.clone();
            fields.insert(MESSAGE_FIELD.to_string(), Value::String(translated));
            Value::Object(fields)
        }
        other => other.clone(),
    }
}

/// Parse resource file contents. The top level must be a JSON object.
pub fn parse_resource(path: &Path, contents: &str) -> Result<ResourceMap, SyncError> {
    let value: Value = serde_json::from_str(contents).map_err(|e| SyncError::Malformed {
        path: path.to_path_buf(),
        message: format!("invalid JSON: {}", e),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(SyncError::Malformed {
            path: path.to_path_buf(),
            message: format!("expected a JSON object, found {}", json_type(&other)),
        }),
    }
}

/// Read and parse a resource file.
pub async fn read_resource(path: &Path) -> Result<ResourceMap, SyncError> {
    let contents =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SyncError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

    // Editors on Windows like to prepend a BOM
    parse_resource(path, contents.trim_start_matches('\u{feff}'))
}

/// Render a resource with two-space indentation and a trailing newline.
pub fn render_resource(path: &Path, resource: &ResourceMap) -> Result<String, SyncError> {
    let mut rendered =
        serde_json::to_string_pretty(resource).map_err(|source| SyncError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write a resource file, replacing any previous contents.
pub async fn write_resource(path: &Path, resource: &ResourceMap) -> Result<(), SyncError> {
    let rendered = render_resource(path, resource)?;

    tokio::fs::write(path, rendered)
        .await
        .map_err(|source| SyncError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
