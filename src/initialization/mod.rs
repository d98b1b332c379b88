//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger (env_logger with plain or JSON formatting)
//! - DNS resolver (hickory with explicit timeouts)
//!
//! All initialization functions return proper error types for error handling.

mod logger;
mod resolver;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;
