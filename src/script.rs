//! Input scripts for the headless driver.
//!
//! A script is JSON Lines: one command or pointer event object per line.
//! Blank lines and lines starting with `#` are skipped. Objects whose `type`
//! starts with `pointer` are routed as pointer events, everything else as
//! commands; the engine decides what it recognizes.

use std::io::BufRead;

use frames::HostMessage;
use serde_json::Value;

/// Errors raised while reading a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("script read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid JSON: {source}")]
    Json { line: usize, source: serde_json::Error },
}

/// Read every message from a JSON Lines script.
///
/// # Errors
///
/// [`ScriptError::Io`] on read failure, [`ScriptError::Json`] naming the
/// first line that is not valid JSON.
pub fn read_script(reader: impl BufRead) -> Result<Vec<HostMessage>, ScriptError> {
    let mut messages = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let value: Value =
            serde_json::from_str(trimmed).map_err(|source| ScriptError::Json { line: index + 1, source })?;
        messages.push(route(value));
    }
    Ok(messages)
}

fn route(value: Value) -> HostMessage {
    let is_pointer = value
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.starts_with("pointer"));
    if is_pointer { HostMessage::Pointer(value) } else { HostMessage::Execute(value) }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;
