pub mod health;
pub mod mcp_handlers;
