//! Exchange-rate derivation and amount formatting.
//!
//! The engine never fails: pairs it cannot resolve convert at a neutral rate
//! of `1` and non-finite amounts are treated as zero, so a caller always has
//! a number to display.

use super::currency::{Currency, CurrencyClass, default_currencies};
use super::rates::RateTable;
use tracing::debug;

/// Rate used for any pair the table cannot resolve.
pub const FALLBACK_RATE: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct ConversionEngine {
    table: RateTable,
    currencies: Vec<Currency>,
}

impl ConversionEngine {
    pub fn new(table: RateTable, currencies: Vec<Currency>) -> Self {
        Self { table, currencies }
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn currency(&self, id: &str) -> Option<&Currency> {
        let id = id.trim();
        self.currencies
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(id))
    }

    fn normalize(&self, id: &str) -> String {
        let lower = id.trim().to_lowercase();
        self.table.canonical_id(&lower).to_string()
    }

    /// Classifies a currency id. The anchor is always fiat; ids missing from
    /// the catalog are treated as crypto.
    pub fn class_of(&self, id: &str) -> CurrencyClass {
        if self.normalize(id) == self.table.anchor() {
            return CurrencyClass::Fiat;
        }
        if let Some(currency) = self.currency(id) {
            return currency.class;
        }
        let canonical = self.normalize(id);
        self.currencies
            .iter()
            .find(|c| self.normalize(&c.id) == canonical)
            .map_or(CurrencyClass::Crypto, |c| c.class)
    }

    /// Whether `id` is in the catalog, is the anchor, or has a tabulated rate to it.
    pub fn is_known(&self, id: &str) -> bool {
        if self.currency(id).is_some() {
            return true;
        }
        let canonical = self.normalize(id);
        let anchor = self.table.anchor();
        canonical == anchor || self.table.lookup(&canonical, anchor).is_some()
    }

    /// Units of `to` per one unit of `from`.
    pub fn rate(&self, from: &str, to: &str) -> f64 {
        let from_id = self.normalize(from);
        let to_id = self.normalize(to);

        if from_id == to_id {
            return 1.0;
        }

        if let Some(rate) = self.table.lookup(&from_id, &to_id) {
            return rate;
        }

        let anchor = self.table.anchor();
        if from_id != anchor
            && to_id != anchor
            && self.class_of(from) == CurrencyClass::Crypto
            && self.class_of(to) == CurrencyClass::Crypto
        {
            if let (Some(from_anchor), Some(to_anchor)) = (
                self.table.lookup(&from_id, anchor),
                self.table.lookup(&to_id, anchor),
            ) {
                let rate = from_anchor / to_anchor;
                debug!(from = %from_id, to = %to_id, rate, "Derived rate via {}", anchor);
                return rate;
            }
        }

        debug!(from = %from_id, to = %to_id, "Unresolved pair, using fallback rate");
        FALLBACK_RATE
    }

    /// Converts `amount` of `from` into `to`. Non-finite amounts count as zero.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        amount * self.rate(from, to)
    }

    /// Renders `value` using the precision of the currency's class.
    pub fn format(&self, value: f64, currency: &str) -> String {
        format_amount(value, self.class_of(currency))
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new(RateTable::default(), default_currencies())
    }
}

/// Fiat renders with exactly two decimals; crypto with up to six, trailing
/// zeros removed. Non-finite values render as `0.00`.
pub fn format_amount(value: f64, class: CurrencyClass) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    // -0.0 would otherwise keep its sign
    let value = if value == 0.0 { 0.0 } else { value };
    let precision = class.precision();
    match class {
        CurrencyClass::Fiat => format!("{value:.precision$}"),
        CurrencyClass::Crypto => {
            let fixed = format!("{value:.precision$}");
            let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
            if trimmed == "-0" {
                "0".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}
