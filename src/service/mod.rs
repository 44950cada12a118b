pub mod assembler;
pub mod ledger;
pub mod rates;
pub mod reporting;

pub use ledger::InvoiceLedger;
pub use rates::{ExchangeRates, FixedRates};
pub use reporting::Reporter;
