use std::error::Error as StdError;
use std::fmt;

/// Server-side configuration failures surfaced at startup.
///
/// Application-level errors travel inside the MCP response envelope and the
/// client wrapper has its own `McpClientError`, so this taxonomy stays small.
#[derive(Debug)]
pub enum AppError {
    Configuration(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl StdError for AppError {}
