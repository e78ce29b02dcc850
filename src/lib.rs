// Re-export modules
pub mod checkers;
pub mod config;
pub mod error;
pub mod parsers;
pub mod pixel;
pub mod results;
pub mod tools;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ToolConfig;
pub use error::ToolError;
pub use parsers::{ExtractorKind, HtmlExtractor};
pub use pixel::{PixelMeasurement, SERP_LIMITS};
pub use results::{Issue, Severity, ToolResult};
pub use tools::{Tool, ToolRequest};
