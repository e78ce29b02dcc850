//! Operational error types.
//!
//! A `ToolError` means a tool could not run at all (missing input, unparsable
//! configuration). Findings about the *content* of valid input are reported as
//! issues inside the tool's result data instead.

use thiserror::Error;

/// Reasons a tool invocation fails before producing any data.
#[derive(Error, Debug)]
pub enum ToolError {
    /// A required input field was empty or whitespace only.
    #[error("{field} is required")]
    EmptyInput { field: &'static str },

    /// Input was present but unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A URL argument could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns `Err(EmptyInput)` when `value` has no non-whitespace content.
pub fn require(value: &str, field: &'static str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::EmptyInput { field });
    }
    Ok(())
}
