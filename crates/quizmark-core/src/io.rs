//! Reading and writing JSON records.
//!
//! Sources are file paths, or `-` for standard input. Destinations are file
//! paths, or standard output when none is given.

use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::error::RecordError;

/// Source name that selects standard input.
pub const STDIN_SOURCE: &str = "-";

/// Read the whole source into a string.
pub fn read_source(source: &str) -> Result<String, RecordError> {
    let result = if source == STDIN_SOURCE {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map(|_| content)
    } else {
        std::fs::read_to_string(source)
    };
    result.map_err(|e| RecordError::Read {
        origin: origin_name(source),
        source: e,
    })
}

/// Read and parse a JSON record from a path or `-`.
pub fn read_json<T: DeserializeOwned>(source: &str) -> Result<T, RecordError> {
    let content = read_source(source)?;
    parse_json(&content, source)
}

/// Read a JSON document that must be an object, such as an evaluation
/// record handed to the mastery scorer.
pub fn read_record(source: &str) -> Result<Value, RecordError> {
    let value: Value = read_json(source)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(RecordError::NotAnObject {
            origin: origin_name(source),
            found: json_kind(&value),
        })
    }
}

/// Parse a JSON record; `source` only labels errors.
pub fn parse_json<T: DeserializeOwned>(content: &str, source: &str) -> Result<T, RecordError> {
    serde_json::from_str(content).map_err(|e| RecordError::Parse {
        origin: origin_name(source),
        source: e,
    })
}

/// Serialize `value` as pretty JSON indented by `indent` spaces.
///
/// Non-ASCII text is written as UTF-8, not escaped.
pub fn to_json_string<T: Serialize>(value: &T, indent: usize) -> Result<String, RecordError> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value
        .serialize(&mut serializer)
        .map_err(RecordError::Serialize)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `contents` to `destination`, or print it to stdout.
pub fn write_output(contents: &str, destination: Option<&Path>) -> Result<(), RecordError> {
    match destination {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| RecordError::Write {
                    destination: path.display().to_string(),
                    source: e,
                })?;
            }
            std::fs::write(path, contents).map_err(|e| RecordError::Write {
                destination: path.display().to_string(),
                source: e,
            })
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{contents}")
                .and_then(|_| handle.flush())
                .map_err(|e| RecordError::Write {
                    destination: "stdout".to_string(),
                    source: e,
                })
        }
    }
}

/// Serialize and write in one step.
pub fn write_json<T: Serialize>(
    value: &T,
    indent: usize,
    destination: Option<&Path>,
) -> Result<(), RecordError> {
    let json = to_json_string(value, indent)?;
    write_output(&json, destination)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn origin_name(source: &str) -> String {
    if source == STDIN_SOURCE {
        "stdin".to_string()
    } else {
        source.to_string()
    }
}
