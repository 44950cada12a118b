pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod service;
pub mod table;

pub use crate::config::AppConfig;
pub use db::{create_memory_pool, create_pool, ensure_schema};
pub use error::{FakturaError, Result};
pub use service::{FixedRates, InvoiceLedger, Reporter};
