//! Currency catalog and selector options

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyClass {
    Fiat,
    Crypto,
}

impl CurrencyClass {
    /// Number of decimal digits rendered for amounts of this class.
    pub fn precision(&self) -> usize {
        match self {
            CurrencyClass::Fiat => 2,
            CurrencyClass::Crypto => 6,
        }
    }
}

impl Display for CurrencyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CurrencyClass::Fiat => "fiat",
                CurrencyClass::Crypto => "crypto",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub meta: Option<String>,
    pub class: CurrencyClass,
}

impl Currency {
    pub fn new(id: &str, label: &str, meta: &str, class: CurrencyClass) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            meta: Some(meta.to_string()),
            class,
        }
    }

    pub fn is_fiat(&self) -> bool {
        self.class == CurrencyClass::Fiat
    }
}

/// A selectable entry in one of the non-currency pickers (wallets, banks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// The currencies offered by the converter dropdowns.
pub fn default_currencies() -> Vec<Currency> {
    vec![
        Currency::new("eth", "ETH", "Ethereum", CurrencyClass::Crypto),
        Currency::new("btc", "BTC", "Bitcoin", CurrencyClass::Crypto),
        Currency::new("ngn", "NGN", "Nigerian Naira", CurrencyClass::Fiat),
        Currency::new("usdt-celo", "USDT", "USDT - CELO", CurrencyClass::Crypto),
    ]
}

pub fn wallet_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("metamask", "Metamask"),
        SelectOption::new("rainbow", "Rainbow"),
        SelectOption::new("walletconnect", "WalletConnect"),
        SelectOption::new(
            "otherwallet",
            "Other Crypto Wallets(Binance, Coinbase, Bybit etc)",
        ),
    ]
}

pub fn bank_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("access", "Access Bank"),
        SelectOption::new("gtb", "GTBank"),
        SelectOption::new("uba", "UBA"),
        SelectOption::new("zenith", "Zenith Bank"),
        SelectOption::new("fidelity", "Fidelity Bank"),
    ]
}

/// Looks up an option by id, case-insensitively.
pub fn find_option<'a>(options: &'a [SelectOption], id: &str) -> Option<&'a SelectOption> {
    options.iter().find(|o| o.id.eq_ignore_ascii_case(id))
}
