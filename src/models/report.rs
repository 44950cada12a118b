use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Raw per-invoice aggregate as it comes out of the join
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceSumRow {
    pub created: i64,
    pub invoice_id: i64,
    pub client_name: String,
    pub currency: String,
    pub vat: f64,
    pub net_sum: f64,
}

/// One invoice in a date-range listing. Totals are derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub created: i64,
    pub invoice_id: i64,
    pub client_name: String,
    pub currency: String,
    pub vat: f64,
    pub net_total: f64,
    pub gross_total: f64,
}

/// Display row of the normalized report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: String,
    pub invoice_id: i64,
    pub client_name: String,
    pub currency: String,   // "EUR (* 10)" once normalized
    pub vat: f64,
    pub net: f64,
    pub gross: f64,
}

/// Normalized report with its grand total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceReport {
    pub rows: Vec<ReportRow>,
    pub total_net: f64,
    pub total_gross: f64,
}
