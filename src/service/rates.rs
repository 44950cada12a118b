use indexmap::IndexMap;

/// Display multiplier from a client currency to the home currency.
///
/// `None` means the amount is shown as stored.
pub trait ExchangeRates: Send + Sync {
    fn multiplier(&self, currency: &str) -> Option<f64>;
}

/// Rates fixed by configuration, not looked up anywhere.
#[derive(Debug, Clone, Default)]
pub struct FixedRates {
    rates: IndexMap<String, f64>,
}

impl FixedRates {
    pub fn new(rates: IndexMap<String, f64>) -> Self {
        let rates = rates
            .into_iter()
            .map(|(currency, rate)| (currency.to_uppercase(), rate))
            .collect();
        Self { rates }
    }
}

impl ExchangeRates for FixedRates {
    fn multiplier(&self, currency: &str) -> Option<f64> {
        self.rates.get(&currency.to_uppercase()).copied()
    }
}

/// Label shown in place of a converted currency, e.g. `EUR (* 10)`
pub fn normalized_label(currency: &str, multiplier: f64) -> String {
    format!("{} (* {})", currency, multiplier)
}
