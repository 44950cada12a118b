use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Invoice header (invoices)
///
/// `id` is a random token, never ordered; use `created` for recency.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub created: i64,   // dato
    pub due: i64,       // forfall
    pub language: String,
    pub client: i64,
    pub bank: i64,
}

/// Per-call overrides for a new invoice; unset fields use the configured defaults
#[derive(Debug, Clone, Default)]
pub struct InvoiceOptions {
    pub created: Option<i64>,
    pub due_in_days: Option<u32>,
    pub language: Option<String>,
}
