//! Method registry and request dispatcher.
//!
//! Handlers are registered once at startup under a method name; afterwards
//! the server is shared read-only (`web::Data<McpServer>`), so lookups need
//! no synchronization. Every dispatch terminates in a well-formed
//! [`McpResponse`]: unknown methods and handler failures are folded into the
//! error envelope, never propagated to the transport layer.

use std::collections::HashMap;
use std::future::Future;

use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use super::types::{McpContext, McpRequest, McpResponse, INTERNAL_ERROR, METHOD_NOT_FOUND};

/// Outcome of a handler invocation.
///
/// Validation failures are expressed as an `Ok` response carrying an error
/// envelope (the handler decided the outcome); an `Err` means the handler
/// itself failed and is mapped to `-32603` by the dispatcher.
pub type HandlerResult = Result<McpResponse, anyhow::Error>;

/// An asynchronous method handler.
pub trait McpHandler: Send + Sync + 'static {
    fn call(&self, request: McpRequest, context: McpContext) -> BoxFuture<'static, HandlerResult>;
}

impl<F, Fut> McpHandler for F
where
    F: Fn(McpRequest, McpContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, request: McpRequest, context: McpContext) -> BoxFuture<'static, HandlerResult> {
        Box::pin(self(request, context))
    }
}

/// Registry mapping method names to handlers, plus the dispatch loop.
pub struct McpServer {
    handlers: HashMap<String, Box<dyn McpHandler>>,
}

impl McpServer {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for a method. Re-registering a name silently
    /// replaces the previous handler (last write wins).
    pub fn register_handler<F, Fut>(&mut self, method: &str, handler: F)
    where
        F: Fn(McpRequest, McpContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        if self.handlers.insert(method.to_string(), Box::new(handler)).is_some() {
            warn!("handler for method '{}' was replaced", method);
        }
    }

    /// Look up a handler by method name.
    pub fn get_handler(&self, method: &str) -> Option<&dyn McpHandler> {
        self.handlers.get(method).map(|h| h.as_ref())
    }

    /// Names of all registered methods, unordered.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Dispatch a request to its handler, folding every failure into the
    /// response envelope.
    pub async fn handle_request(&self, request: McpRequest, context: McpContext) -> McpResponse {
        let Some(handler) = self.get_handler(&request.method) else {
            debug!("no handler registered for method '{}'", request.method);
            return McpResponse::error(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            );
        };

        let method = request.method.clone();
        match handler.call(request, context).await {
            Ok(response) => response,
            Err(e) => {
                warn!("handler '{}' failed: {}", method, e);
                let message = e.to_string();
                let message = if message.is_empty() {
                    "Internal error".to_string()
                } else {
                    message
                };
                McpResponse::error(INTERNAL_ERROR, message)
            }
        }
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}
