use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::net::TcpListener;

use spendlens_server::config::AppSettings;
use spendlens_server::mcp::{register_builtin_handlers, register_financial_handlers, McpServer};
use spendlens_server::routes::{configure_public_routes, configure_routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load application settings
    let app_settings = match AppSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load application settings: {}", e);
            log::error!("Cannot start server without valid settings");
            std::process::exit(1);
        }
    };

    // Build the method registry once; it is read-only after startup and
    // shared across workers through web::Data.
    let mut mcp_server = McpServer::new();
    register_builtin_handlers(&mut mcp_server);
    register_financial_handlers(&mut mcp_server);
    let method_count = mcp_server.method_names().count();
    let mcp_server = web::Data::new(mcp_server);
    log::info!("MCP registry initialized with {} methods", method_count);

    // Get server host and port from settings
    let host = &app_settings.server.host;
    let port = app_settings.server.port;

    log::info!("Starting server at http://{}:{}", host, port);

    let server_addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(server_addr)?;

    HttpServer::new(move || {
        // Clone the data for the factory closure
        let app_settings = app_settings.clone();
        let mcp_server = mcp_server.clone();

        // Configure CORS using actix-cors
        let mut cors = Cors::default().supports_credentials();

        // Add allowed origins based on configuration
        if app_settings.server.cors_origins.contains(&"*".to_string()) {
            cors = cors.allow_any_origin();
        } else {
            for origin in &app_settings.server.cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        // Common CORS settings for all origins
        cors = cors.allow_any_method().allow_any_header();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(app_settings.clone()))
            .app_data(mcp_server)
            // Public routes (health check)
            .configure(configure_public_routes)
            // API routes
            .service(web::scope("/api").configure(configure_routes))
    })
    .listen(listener)?
    .run()
    .await
}
