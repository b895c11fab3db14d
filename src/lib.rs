//! SpendLens Server Library
//!
//! This library exports the MCP dispatch core (method registry, dispatcher,
//! built-in handlers), the expense aggregation functions, and the typed
//! client wrapper used by the server binary and by integration tests.

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mcp;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types for convenience
pub use config::AppSettings;
pub use error::AppError;
pub use mcp::{McpContext, McpRequest, McpResponse, McpServer};
