//! Shared setup: a fresh in-memory database per test.

#![allow(dead_code)]

use hammer_faktura::config::{CurrencyConfig, InvoiceDefaults};
use hammer_faktura::models::{NewBank, NewClient};
use hammer_faktura::{create_memory_pool, ensure_schema, FixedRates, InvoiceLedger, Reporter};
use sqlx::SqlitePool;

pub async fn pool() -> SqlitePool {
    let pool = create_memory_pool().await.expect("in-memory pool");
    ensure_schema(&pool).await.expect("schema");
    pool
}

pub async fn ledger() -> InvoiceLedger {
    InvoiceLedger::new(pool().await, InvoiceDefaults::default())
}

pub fn reporter(ledger: &InvoiceLedger) -> Reporter {
    Reporter::new(
        ledger.pool().clone(),
        Box::new(FixedRates::new(CurrencyConfig::default().rates)),
    )
}

pub async fn client(ledger: &InvoiceLedger, org_nr: &str, vat: f64, currency: &str) -> i64 {
    ledger
        .add_client(&NewClient {
            name: format!("Client {}", org_nr),
            org_nr: org_nr.to_string(),
            address: "Storgata 1, 0155 Oslo".to_string(),
            vat,
            currency: currency.to_string(),
        })
        .await
        .expect("client")
}

pub async fn bank(ledger: &InvoiceLedger) -> i64 {
    ledger
        .add_bank(&NewBank {
            account: "1503.12.34567".to_string(),
            iban: "NO8315031234567".to_string(),
            bic: "DNBANOKKXXX".to_string(),
            bank_name: "DNB".to_string(),
        })
        .await
        .expect("bank")
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("count")
}
