use ::config::{Config, ConfigError, Environment, File};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub invoice: InvoiceDefaults,
    pub currency: CurrencyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Defaults applied to invoices created without explicit options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDefaults {
    pub due_in_days: u32,
    pub language: String,
}

/// Display multipliers from a client currency to the home currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub rates: IndexMap<String, f64>,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            due_in_days: 30,
            language: "NO".to_string(),
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        let mut rates = IndexMap::new();
        rates.insert("EUR".to_string(), 10.0);
        rates.insert("USD".to_string(), 8.0);
        Self { rates }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://hammer_faktura.db".to_string()),
                max_connections: 5,
            },
            invoice: InvoiceDefaults::default(),
            currency: CurrencyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load defaults, then `hammer_faktura.toml` if present, then `FAKTURA__*` variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("hammer_faktura")
    }

    pub fn load_from(file_stem: &str) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let mut builder = Config::builder()
            .set_default("database.url", defaults.database.url.clone())?
            .set_default("database.max_connections", i64::from(defaults.database.max_connections))?
            .set_default("invoice.due_in_days", i64::from(defaults.invoice.due_in_days))?
            .set_default("invoice.language", defaults.invoice.language.clone())?;

        for (currency, rate) in &defaults.currency.rates {
            builder = builder.set_default(format!("currency.rates.{currency}"), *rate)?;
        }

        let mut config: AppConfig = builder
            .add_source(File::with_name(file_stem).required(false))
            .add_source(Environment::with_prefix("FAKTURA").separator("__"))
            .build()?
            .try_deserialize()?;

        // config keys are case-insensitive and come back lowercased
        config.currency.rates = config
            .currency
            .rates
            .into_iter()
            .map(|(currency, rate)| (currency.to_uppercase(), rate))
            .collect();

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_display_rates() {
        let config = AppConfig::load_from("does_not_exist_hammer_faktura").unwrap();
        assert_eq!(config.invoice.due_in_days, 30);
        assert_eq!(config.invoice.language, "NO");
        assert_eq!(config.currency.rates.get("EUR"), Some(&10.0));
        assert_eq!(config.currency.rates.get("USD"), Some(&8.0));
    }
}
