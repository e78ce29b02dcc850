use crate::error::ToolError;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Envelope returned by every tool.
///
/// `success == false` means the tool could not run and `data` is absent.
/// A tool that ran and found the input invalid still reports `success == true`
/// and flags the problem inside `data`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Milliseconds spent in the tool. Diagnostic only.
    pub processing_time: f64,
}

impl<T> ToolResult<T> {
    /// Successful result carrying `data`
    pub fn ok(data: T, started: Instant) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            warnings: Vec::new(),
            processing_time: elapsed_ms(started),
        }
    }

    /// Failed result; never carries data
    pub fn failure(error: &ToolError, started: Instant) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            warnings: Vec::new(),
            processing_time: elapsed_ms(started),
        }
    }

    /// Attach display-only warnings
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Runs `f`, timing it and folding its error into the envelope.
    pub fn run<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, ToolError>,
    {
        let started = Instant::now();
        match f() {
            Ok(data) => Self::ok(data, started),
            Err(e) => {
                ::log::debug!("Tool failed: {}", e);
                Self::failure(&e, started)
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Makes the input invalid
    Error,
    /// Advisory, does not affect validity
    Warning,
    Info,
}

/// A single diagnostic produced by a checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

/// True when none of the issues is an error
pub fn no_errors(issues: &[Issue]) -> bool {
    issues.iter().all(|i| i.severity != Severity::Error)
}
