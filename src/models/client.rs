use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Client (clients)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Client {
    pub pk: i64,
    pub name: String,       // navn
    pub org_nr: String,     // natural key
    pub address: String,    // adresse
    pub vat: f64,           // fraction, 0.25 = 25%
    pub currency: String,   // valuta
}

/// Client fields before insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub org_nr: String,
    pub address: String,
    pub vat: f64,
    pub currency: String,
}
