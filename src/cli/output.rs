//! Output formatting for CLI commands

use serde::Serialize;

/// Format output as JSON or plain text based on --json flag
pub fn format_output<T, F>(data: &T, json: bool, text: F) -> String
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    if json {
        serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
    } else {
        text(data)
    }
}
