//! Wire types for the Method Call Protocol endpoint.
//!
//! The envelope is JSON-RPC shaped but carries no `jsonrpc`/`id` fields: a
//! request is `{method, params?}` and a response is `{result}` or `{error}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Malformed request body, caught at the transport boundary.
pub const PARSE_ERROR: i32 = -32700;
/// No handler registered under the requested method name.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Handler-detected missing or invalid parameters.
pub const INVALID_PARAMS: i32 = -32602;
/// Handler failed while executing.
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpRequest {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl McpRequest {
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Convenience accessor for a named field of `params`.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.as_ref().and_then(|p| p.get(key))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

/// Response envelope. Exactly one of `result`/`error` is populated by
/// convention; the dispatcher never produces both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct McpResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl McpResponse {
    pub fn result(value: Value) -> Self {
        Self {
            result: Some(value),
            error: None,
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Ambient per-call values derived once by the transport endpoint and passed
/// read-only into every handler. Not part of the request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct McpContext {
    pub user_id: Option<String>,
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_params_omits_field() {
        let req = McpRequest::new("ping", None);
        let wire = serde_json::to_value(&req).unwrap();
        assert_eq!(wire, json!({"method": "ping"}));
    }

    #[test]
    fn test_response_serializes_single_field() {
        let ok = serde_json::to_value(McpResponse::result(json!("pong"))).unwrap();
        assert_eq!(ok, json!({"result": "pong"}));

        let err = serde_json::to_value(McpResponse::error(METHOD_NOT_FOUND, "nope")).unwrap();
        assert_eq!(err, json!({"error": {"code": -32601, "message": "nope"}}));
    }

    #[test]
    fn test_param_accessor() {
        let req = McpRequest::new("echo", Some(json!({"message": "hi"})));
        assert_eq!(req.param("message"), Some(&json!("hi")));
        assert_eq!(req.param("missing"), None);

        let bare = McpRequest::new("echo", None);
        assert_eq!(bare.param("message"), None);
    }
}
