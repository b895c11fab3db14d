//! Typed client for the MCP endpoint.
//!
//! Mirrors the dispatch contract from the caller's side: `call` performs the
//! generic round-trip, the convenience methods unwrap `result` (or a named
//! sub-field) and convert an error envelope back into a typed failure.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::mcp::types::{McpRequest, McpResponse};
use crate::models::{FinancialData, FinancialSummary, TimeFilter};

#[derive(Debug, Error)]
pub enum McpClientError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP error! status: {0}")]
    UnexpectedStatus(StatusCode),

    /// The response envelope carried an application error.
    #[error("{message}")]
    Rpc { code: i32, message: String },

    /// The `result` payload did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// New record as submitted by the entry form, before the server assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFinancialData {
    pub date: String,
    pub price: f64,
    pub category: String,
    pub retailer: String,
}

/// Acknowledgement returned by `financial.add`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReceipt {
    pub success: bool,
    pub data: FinancialData,
}

/// Acknowledgement returned by `financial.delete`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReceipt {
    pub success: bool,
    pub deleted_id: String,
}

pub struct McpClient {
    endpoint_url: String,
    http: Client,
}

impl McpClient {
    /// `endpoint_url` is the full URL of the MCP endpoint,
    /// e.g. `http://localhost:8080/api/mcp`.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            http: Client::new(),
        }
    }

    /// Generic round-trip: serialize, POST, decode the envelope.
    pub async fn call(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<McpResponse, McpClientError> {
        let request = McpRequest::new(method, params);

        let response = self
            .http
            .post(&self.endpoint_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(McpClientError::UnexpectedStatus(response.status()));
        }

        Ok(response.json::<McpResponse>().await?)
    }

    /// Unwraps the envelope, converting an embedded error into a failure.
    fn unwrap_result(response: McpResponse) -> Result<Value, McpClientError> {
        if let Some(error) = response.error {
            return Err(McpClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result.unwrap_or(Value::Null))
    }

    pub async fn ping(&self) -> Result<String, McpClientError> {
        let result = Self::unwrap_result(self.call("ping", None).await?)?;
        Ok(serde_json::from_value(result)?)
    }

    pub async fn echo(&self, message: &str) -> Result<Value, McpClientError> {
        Self::unwrap_result(self.call("echo", Some(json!({ "message": message }))).await?)
    }

    pub async fn add_financial_data(
        &self,
        data: &NewFinancialData,
    ) -> Result<FinancialData, McpClientError> {
        let result = Self::unwrap_result(
            self.call("financial.add", Some(json!({ "data": data }))).await?,
        )?;
        let receipt: AddReceipt = serde_json::from_value(result)?;
        Ok(receipt.data)
    }

    pub async fn get_financial_summary(
        &self,
        data: &[FinancialData],
        time_filter: Option<&TimeFilter>,
    ) -> Result<FinancialSummary, McpClientError> {
        let mut params = json!({ "data": data });
        if let Some(filter) = time_filter {
            params["timeFilter"] = serde_json::to_value(filter)?;
        }

        let result = Self::unwrap_result(self.call("financial.summary", Some(params)).await?)?;
        Ok(serde_json::from_value(result)?)
    }

    pub async fn get_financial_data(&self) -> Result<Vec<FinancialData>, McpClientError> {
        let result = Self::unwrap_result(self.call("financial.get", None).await?)?;
        Ok(serde_json::from_value(result)?)
    }

    pub async fn delete_financial_data(
        &self,
        id: &str,
    ) -> Result<DeleteReceipt, McpClientError> {
        let result = Self::unwrap_result(
            self.call("financial.delete", Some(json!({ "id": id }))).await?,
        )?;
        Ok(serde_json::from_value(result)?)
    }
}
