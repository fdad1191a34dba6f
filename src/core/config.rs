//! YAML configuration for rates, catalog and the mock account directory

use super::controller::Mode;
use super::currency::{Currency, default_currencies};
use super::engine::ConversionEngine;
use super::rates::{DEFAULT_ANCHOR, RateEntry, RateTable, default_aliases, default_entries};
use super::resolver::{DEFAULT_LOOKUP_DELAY_MS, MockAccount, default_accounts};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

fn default_anchor() -> String {
    DEFAULT_ANCHOR.to_string()
}

fn default_lookup_delay_ms() -> u64 {
    DEFAULT_LOOKUP_DELAY_MS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_anchor")]
    pub anchor: String,
    #[serde(default = "default_entries")]
    pub rates: Vec<RateEntry>,
    #[serde(default = "default_aliases")]
    pub aliases: HashMap<String, String>,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<Currency>,
    #[serde(default)]
    pub default_mode: Mode,
    #[serde(default = "default_lookup_delay_ms")]
    pub account_lookup_delay_ms: u64,
    #[serde(default = "default_accounts")]
    pub accounts: Vec<MockAccount>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            anchor: default_anchor(),
            rates: default_entries(),
            aliases: default_aliases(),
            currencies: default_currencies(),
            default_mode: Mode::default(),
            account_lookup_delay_ms: default_lookup_delay_ms(),
            accounts: default_accounts(),
        }
    }
}

impl AppConfig {
    /// Loads the config at the default location, falling back to built-in
    /// tables when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxramp", "fxramp")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .rate_table()
            .with_context(|| format!("Invalid rates in config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn rate_table(&self) -> Result<RateTable> {
        RateTable::new(&self.anchor, self.rates.clone(), self.aliases.clone())
    }

    pub fn engine(&self) -> Result<ConversionEngine> {
        Ok(ConversionEngine::new(
            self.rate_table()?,
            self.currencies.clone(),
        ))
    }

    pub fn lookup_delay(&self) -> Duration {
        Duration::from_millis(self.account_lookup_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyClass;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.anchor, "ngn");
        assert_eq!(config.rates.len(), 3);
        assert_eq!(config.currencies.len(), 4);
        assert_eq!(config.default_mode, Mode::CryptoToCash);
        assert_eq!(config.lookup_delay(), Duration::from_millis(800));

        let engine = config.engine().unwrap();
        assert_eq!(engine.rate("eth", "ngn"), 1_200_000.0);
    }

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
anchor: "NGN"
rates:
  - from: eth
    to: ngn
    rate: 1500000
  - from: sol
    to: ngn
    rate: 250000
aliases:
  wsol: sol
currencies:
  - id: eth
    label: ETH
    class: crypto
  - id: sol
    label: SOL
    meta: Solana
    class: crypto
  - id: ngn
    label: NGN
    class: fiat
default_mode: cash-to-crypto
account_lookup_delay_ms: 50
accounts:
  - bank_id: gtb
    account_number: "1111111111"
    name: "Test Holder"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.default_mode, Mode::CashToCrypto);
        assert_eq!(config.account_lookup_delay_ms, 50);
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.currencies[1].meta.as_deref(), Some("Solana"));
        assert!(config.currencies[0].meta.is_none());

        let engine = config.engine().unwrap();
        assert_eq!(engine.rate("wsol", "ngn"), 250_000.0);
        assert_eq!(engine.rate("eth", "sol"), 1_500_000.0 / 250_000.0);
        assert_eq!(engine.rate("btc", "ngn"), 1.0);
        assert_eq!(engine.class_of("ngn"), CurrencyClass::Fiat);
    }

    #[test]
    fn test_invalid_rate_rejected_on_load() {
        let config_file = tempfile::NamedTempFile::new().unwrap();
        fs::write(
            config_file.path(),
            "rates:\n  - from: eth\n    to: ngn\n    rate: -1\n",
        )
        .unwrap();

        let err = AppConfig::load_from_path(config_file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid rates"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = AppConfig::load_from_path("/nonexistent/fxramp/config.yaml");
        assert!(result.is_err());
    }
}
