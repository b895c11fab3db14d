//! Built-in method handlers.
//!
//! Parameters arrive as opaque JSON on the dispatch contract and are
//! deserialized into typed structs here, at the handler boundary; any shape
//! problem is answered with a `-32602` envelope rather than a failure.

use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::models::{FinancialData, TimeFilter};
use crate::services::summary::summarize;

use super::server::{HandlerResult, McpServer};
use super::types::{McpResponse, INVALID_PARAMS};

fn invalid_params(message: &str) -> HandlerResult {
    Ok(McpResponse::error(INVALID_PARAMS, message))
}

/// Registers `ping` and `echo`.
pub fn register_builtin_handlers(server: &mut McpServer) {
    server.register_handler("ping", |_req, _ctx| async {
        Ok(McpResponse::result(json!("pong")))
    });

    // Echoes `params.message` back; an absent message is `null`, not an error.
    server.register_handler("echo", |req, _ctx| async move {
        let message = req.param("message").cloned().unwrap_or(Value::Null);
        Ok(McpResponse::result(message))
    });
}

/// New-record payload for `financial.add`. Everything optional so that
/// validation can answer with a single uniform error instead of a serde one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NewRecordParams {
    date: Option<String>,
    price: Option<f64>,
    category: Option<String>,
    retailer: Option<String>,
}

impl NewRecordParams {
    /// All four fields present and non-empty; a zero price is rejected along
    /// with a missing one (the form never submits free entries).
    fn validate(self) -> Option<FinancialData> {
        let date = self.date.filter(|d| !d.is_empty())?;
        let price = self.price.filter(|p| *p > 0.0)?;
        let category = self.category.filter(|c| !c.is_empty())?;
        let retailer = self.retailer.filter(|r| !r.is_empty())?;

        Some(FinancialData {
            id: Uuid::new_v4().to_string(),
            date,
            price,
            category,
            retailer,
        })
    }
}

/// Registers the `financial.*` method family.
///
/// These are stateless: `add`/`delete` acknowledge without persisting and
/// `get` has no backing store, while `summary` aggregates the records the
/// caller sends along.
pub fn register_financial_handlers(server: &mut McpServer) {
    server.register_handler("financial.add", |req, _ctx| async move {
        let Some(data) = req.param("data") else {
            return invalid_params("Invalid financial data provided");
        };
        let Ok(params) = serde_json::from_value::<NewRecordParams>(data.clone()) else {
            return invalid_params("Invalid financial data provided");
        };
        let Some(record) = params.validate() else {
            return invalid_params("Invalid financial data provided");
        };

        Ok(McpResponse::result(json!({
            "success": true,
            "data": record,
        })))
    });

    server.register_handler("financial.summary", |req, ctx| async move {
        let Some(data) = req.param("data").filter(|d| d.is_array()) else {
            return invalid_params("Invalid financial data provided");
        };
        let Ok(records) = serde_json::from_value::<Vec<FinancialData>>(data.clone()) else {
            return invalid_params("Invalid financial data provided");
        };

        // JS clients send `null` for "no filter"; treat it like an absent key.
        let time_filter = match req.param("timeFilter").filter(|v| !v.is_null()) {
            None => None,
            Some(raw) => match serde_json::from_value::<TimeFilter>(raw.clone()) {
                Ok(f) => Some(f),
                Err(_) => return invalid_params("Invalid time filter provided"),
            },
        };

        // The currency preference rides along for display layers; the
        // aggregation itself is currency-agnostic.
        let currency = ctx.currency.as_deref().unwrap_or("USD");
        debug!("computing summary over {} records (currency={})", records.len(), currency);

        let today = Local::now().date_naive();
        let summary = summarize(&records, time_filter.as_ref(), today);
        Ok(McpResponse::result(serde_json::to_value(summary)?))
    });

    server.register_handler("financial.get", |_req, _ctx| async {
        Ok(McpResponse::result(json!([])))
    });

    server.register_handler("financial.delete", |req, _ctx| async move {
        let id = req
            .param("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty());
        let Some(id) = id else {
            return invalid_params("ID is required for deletion");
        };

        // No store behind this yet: acknowledge regardless of existence.
        Ok(McpResponse::result(json!({
            "success": true,
            "deletedId": id,
        })))
    });
}
