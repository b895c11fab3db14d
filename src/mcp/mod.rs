pub mod handlers;
pub mod server;
pub mod types;

pub use handlers::{register_builtin_handlers, register_financial_handlers};
pub use server::{HandlerResult, McpHandler, McpServer};
pub use types::{McpContext, McpRequest, McpResponse, RpcError};
