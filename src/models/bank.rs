use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Paying-to bank account (banks)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Bank {
    pub pk: i64,
    pub account: String,    // konto, natural key
    pub iban: String,
    pub bic: String,
    pub bank_name: String,  // bank
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBank {
    pub account: String,
    pub iban: String,
    pub bic: String,
    pub bank_name: String,
}
