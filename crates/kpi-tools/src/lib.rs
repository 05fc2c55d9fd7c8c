//! Tool registration and execution for stock-kpi
//!
//! A tool is a named callable with a JSON input schema. Assistant clients
//! discover tools through a [`ToolRegistry`] and invoke them with JSON
//! parameters.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolDefinition};
