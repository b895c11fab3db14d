//! Transport endpoint for the MCP dispatch core.
//!
//! The body is parsed by hand rather than through `web::Json` so that a
//! malformed payload can be answered with the protocol's own `-32700`
//! envelope. Framing failures are the only case that gets a non-2xx status;
//! application errors travel inside a 200 body, JSON-RPC style.

use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;

use crate::config::AppSettings;
use crate::mcp::types::{McpContext, McpRequest, McpResponse, PARSE_ERROR};
use crate::mcp::McpServer;

/// POST /api/mcp
pub async fn mcp_endpoint(
    http_request: HttpRequest,
    body: web::Bytes,
    settings: web::Data<AppSettings>,
    server: web::Data<McpServer>,
) -> HttpResponse {
    let request: McpRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejecting malformed MCP request body: {}", e);
            return HttpResponse::BadRequest().json(McpResponse::error(PARSE_ERROR, "Parse error"));
        }
    };

    // Per-call preference: the currency cookie set by the settings dialog,
    // falling back to the configured default. No user identity yet.
    let currency = http_request
        .cookie("currency")
        .map(|c| c.value().to_string())
        .unwrap_or_else(|| settings.preferences.default_currency.clone());

    let context = McpContext {
        user_id: None,
        currency: Some(currency),
    };

    debug!("Dispatching MCP method: {}", request.method);
    let response = server.handle_request(request, context).await;

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::types::{INVALID_PARAMS, METHOD_NOT_FOUND};
    use crate::mcp::{register_builtin_handlers, register_financial_handlers, McpResponse};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;

    fn test_settings() -> AppSettings {
        AppSettings::from_env().unwrap()
    }

    fn test_server() -> McpServer {
        let mut server = McpServer::new();
        register_builtin_handlers(&mut server);

        // A probe that reflects the derived context back to the test.
        server.register_handler("context.currency", |_req, ctx: McpContext| async move {
            Ok(McpResponse::result(json!(ctx.currency)))
        });
        register_financial_handlers(&mut server);
        server
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_settings()))
                    .app_data(web::Data::new(test_server()))
                    .route("/api/mcp", web::post().to(mcp_endpoint)),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn test_malformed_body_is_400_with_parse_error() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/mcp")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: McpResponse = test::read_body_json(resp).await;
        let error = body.error.expect("expected error envelope");
        assert_eq!(error.code, PARSE_ERROR);
        assert_eq!(error.message, "Parse error");
    }

    #[actix_rt::test]
    async fn test_unknown_method_is_200_with_envelope_error() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/mcp")
            .set_json(json!({"method": "nope"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: McpResponse = test::read_body_json(resp).await;
        assert_eq!(body.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_ping_round_trip() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/mcp")
            .set_json(json!({"method": "ping"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: McpResponse = test::read_body_json(resp).await;
        assert_eq!(body.result, Some(json!("pong")));
    }

    #[actix_rt::test]
    async fn test_currency_defaults_without_cookie() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/mcp")
            .set_json(json!({"method": "context.currency"}))
            .to_request();
        let body: McpResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.result, Some(json!("USD")));
    }

    #[actix_rt::test]
    async fn test_currency_cookie_reaches_context() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/mcp")
            .cookie(actix_web::cookie::Cookie::new("currency", "EUR"))
            .set_json(json!({"method": "context.currency"}))
            .to_request();
        let body: McpResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.result, Some(json!("EUR")));
    }

    #[actix_rt::test]
    async fn test_validation_error_travels_in_200_body() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/mcp")
            .set_json(json!({"method": "financial.delete", "params": {}}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: McpResponse = test::read_body_json(resp).await;
        assert_eq!(body.error.unwrap().code, INVALID_PARAMS);
    }
}
