use serde::{Deserialize, Serialize};

/// A single expense record as entered by the user.
///
/// Records are created client-side; `id` is assigned server-side on
/// `financial.add`, so summary input is allowed to omit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    #[serde(default)]
    pub id: String,
    /// ISO date string (date-only or RFC 3339 datetime).
    pub date: String,
    pub price: f64,
    pub category: String,
    pub retailer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailerTotal {
    pub retailer: String,
    pub total: f64,
}

/// Aggregated view over a record list.
///
/// `total_amount` and `total_entries` cover ALL records while the breakdowns
/// cover only the time-filtered subset. Callers rely on this asymmetry: the
/// header shows lifetime totals, the charts show the selected window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_amount: f64,
    pub filtered_total_amount: f64,
    pub total_entries: usize,
    pub category_totals: Vec<CategoryTotal>,
    pub retailer_totals: Vec<RetailerTotal>,
}

/// Relative calendar window selected in the UI.
///
/// Only `kind` drives the filtering; `start_date`/`end_date` are accepted
/// from older clients but not consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeFilter {
    #[serde(rename = "type")]
    pub kind: TimeFilterKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl TimeFilter {
    pub fn of(kind: TimeFilterKind) -> Self {
        Self {
            kind,
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilterKind {
    Daily,
    Weekly,
    Monthly,
    All,
}
