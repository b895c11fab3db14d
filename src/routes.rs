use actix_web::web;
use crate::handlers;

/// Configures the API routes. Mounted under the "/api" scope in main.rs.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // MCP endpoint (/api/mcp): single POST entry point for all methods
    cfg.route("/mcp", web::post().to(handlers::mcp_handlers::mcp_endpoint));
}

/// Configures publicly accessible routes mounted directly on the app.
pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health::health_check));
}

// Make sure all modules are properly compiled
#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_routes_compile() {
        let _app = test::init_service(
            actix_web::App::new()
                .configure(configure_routes)
                .configure(configure_public_routes),
        )
        .await;
    }
}
