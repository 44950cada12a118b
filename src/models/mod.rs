pub mod bank;
pub mod client;
pub mod generator;
pub mod invoice;
pub mod item;
pub mod report;

pub use bank::{Bank, NewBank};
pub use client::{Client, NewClient};
pub use generator::{round2, Generator};
pub use invoice::{Invoice, InvoiceOptions};
pub use item::{InvoiceItem, ItemDraft, ItemLine, NewItem};
pub use report::{InvoiceReport, InvoiceSumRow, InvoiceSummary, ReportRow};
