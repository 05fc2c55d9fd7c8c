//! Shared utilities for stock-kpi
//!
//! Logging setup and the application-level configuration shared by the
//! library and the command-line front end.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
