//! Canonical exchange-rate entries

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_ANCHOR: &str = "ngn";

/// A directly tabulated rate: units of `to` per one unit of `from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub from: String,
    pub to: String,
    pub rate: f64,
}

impl RateEntry {
    pub fn new(from: &str, to: &str, rate: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            rate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateTable {
    anchor: String,
    entries: HashMap<(String, String), f64>,
    aliases: HashMap<String, String>,
}

impl RateTable {
    /// Builds a table, rejecting any rate that is not strictly positive and finite.
    pub fn new(
        anchor: &str,
        entries: Vec<RateEntry>,
        aliases: HashMap<String, String>,
    ) -> Result<Self> {
        let mut table = HashMap::new();
        for entry in entries {
            if !entry.rate.is_finite() || entry.rate <= 0.0 {
                bail!(
                    "Invalid rate {} for {}-{}: rates must be positive and finite",
                    entry.rate,
                    entry.from,
                    entry.to
                );
            }
            let key = (entry.from.to_lowercase(), entry.to.to_lowercase());
            if key.0 == key.1 {
                bail!("Rate entry {}-{} maps a currency onto itself", entry.from, entry.to);
            }
            if table.contains_key(&key) {
                bail!("Rate entry {}-{} is listed more than once", entry.from, entry.to);
            }
            let reverse = (key.1.clone(), key.0.clone());
            if table.contains_key(&reverse) {
                bail!(
                    "Rate entry {}-{} duplicates its reverse; only one direction may be tabulated",
                    entry.from,
                    entry.to
                );
            }
            table.insert(key, entry.rate);
        }

        let aliases = aliases
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
            .collect();

        Ok(Self {
            anchor: anchor.to_lowercase(),
            entries: table,
            aliases,
        })
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Maps a currency id onto the key used in the table.
    pub fn canonical_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.aliases.get(id).map_or(id, |s| s.as_str())
    }

    /// Returns the tabulated rate for exactly this direction.
    pub fn direct(&self, from: &str, to: &str) -> Option<f64> {
        self.entries
            .get(&(from.to_string(), to.to_string()))
            .copied()
    }

    /// Returns the tabulated rate for this pair, dividing when only the reverse is stored.
    pub fn lookup(&self, from: &str, to: &str) -> Option<f64> {
        if let Some(rate) = self.direct(from, to) {
            debug!(from, to, rate, "Direct rate");
            return Some(rate);
        }
        self.direct(to, from).map(|rate| {
            debug!(from, to, rate, "Reverse rate");
            1.0 / rate
        })
    }
}

pub fn default_entries() -> Vec<RateEntry> {
    vec![
        RateEntry::new("eth", "ngn", 1_200_000.0),
        RateEntry::new("btc", "ngn", 18_000_000.0),
        RateEntry::new("usdt", "ngn", 1_200.0),
    ]
}

pub fn default_aliases() -> HashMap<String, String> {
    HashMap::from([("usdt-celo".to_string(), "usdt".to_string())])
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.to_string(),
            entries: default_entries()
                .into_iter()
                .map(|e| ((e.from, e.to), e.rate))
                .collect(),
            aliases: default_aliases(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_lookup() {
        let table = RateTable::default();
        assert_eq!(table.anchor(), "ngn");
        assert_eq!(table.direct("eth", "ngn"), Some(1_200_000.0));
        assert_eq!(table.direct("ngn", "eth"), None);
        assert_eq!(table.lookup("ngn", "btc"), Some(1.0 / 18_000_000.0));
        assert_eq!(table.lookup("eth", "btc"), None);
    }

    #[test]
    fn test_aliases() {
        let table = RateTable::default();
        assert_eq!(table.canonical_id("usdt-celo"), "usdt");
        assert_eq!(table.canonical_id("eth"), "eth");
    }

    #[test]
    fn test_rejects_invalid_rates() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = RateTable::new("ngn", vec![RateEntry::new("eth", "ngn", bad)], HashMap::new());
            assert!(result.is_err(), "rate {bad} should be rejected");
        }
    }

    #[test]
    fn test_rejects_both_directions() {
        let entries = vec![
            RateEntry::new("eth", "ngn", 1_000.0),
            RateEntry::new("ngn", "eth", 0.002),
        ];
        let err = RateTable::new("ngn", entries, HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("duplicates its reverse"));
    }

    #[test]
    fn test_rejects_self_and_repeated_entries() {
        let err = RateTable::new(
            "ngn",
            vec![RateEntry::new("ETH", "eth", 1.0)],
            HashMap::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("onto itself"));

        let entries = vec![
            RateEntry::new("eth", "ngn", 1_000.0),
            RateEntry::new("ETH", "NGN", 2_000.0),
        ];
        let err = RateTable::new("ngn", entries, HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_new_normalizes_case() {
        let table = RateTable::new(
            "NGN",
            vec![RateEntry::new("ETH", "NGN", 10.0)],
            HashMap::from([("WETH".to_string(), "ETH".to_string())]),
        )
        .unwrap();
        assert_eq!(table.anchor(), "ngn");
        assert_eq!(table.direct("eth", "ngn"), Some(10.0));
        assert_eq!(table.canonical_id("weth"), "eth");
    }
}
