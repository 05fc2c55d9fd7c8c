//! Error types for tool execution

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type for tool lookup and execution
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool registered under the requested name
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Parameters did not match the tool's input schema
    #[error("Invalid parameters for {tool}: {reason}")]
    InvalidParameters {
        tool: String,
        reason: String,
    },

    /// Tool ran but could not produce a result
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
}
