use super::{Bank, Client, Invoice, ItemLine};
use serde::Serialize;

/// Fully assembled invoice, the unit handed to a document renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generator {
    pub invoice: Invoice,
    pub client: Client,
    pub bank: Bank,
    /// Sorted by work date
    pub items: Vec<ItemLine>,
}

impl Generator {
    pub fn net_total(&self) -> f64 {
        round2(self.items.iter().map(|item| item.net).sum())
    }

    /// Each line uses its own VAT override, falling back to the client's rate.
    pub fn gross_total(&self) -> f64 {
        round2(
            self.items
                .iter()
                .map(|item| item.net * (1.0 + item.vat.unwrap_or(self.client.vat)))
                .sum(),
        )
    }
}

/// Round to cents
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
