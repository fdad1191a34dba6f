//! State of the converter form and the pay/receive synchronization.
//!
//! Exactly one amount field is authoritative at a time: the one the user
//! edited last. Every edit or currency selection recomputes the other field
//! from it, so the two derived computations never feed back into each other.

use super::engine::ConversionEngine;
use super::input::{parse_amount, sanitize_amount};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_AMOUNT: &str = "1.00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    CryptoToCash,
    CashToCrypto,
    CryptoLoan,
}

impl Mode {
    /// Default (source, target) currencies selected when the mode is activated.
    pub fn default_currencies(&self) -> (&'static str, &'static str) {
        match self {
            Mode::CryptoToCash | Mode::CryptoLoan => ("eth", "ngn"),
            Mode::CashToCrypto => ("ngn", "eth"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::CryptoToCash => "Crypto to cash",
            Mode::CashToCrypto => "Cash to crypto",
            Mode::CryptoLoan => "Crypto to fiat loan",
        }
    }

    /// Text of the call-to-action button for this mode.
    pub fn action_label(&self) -> &'static str {
        match self {
            Mode::CryptoToCash => "Convert now",
            Mode::CashToCrypto => "Buy crypto",
            Mode::CryptoLoan => "Request loan",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Mode::CryptoToCash => "crypto-to-cash",
                Mode::CashToCrypto => "cash-to-crypto",
                Mode::CryptoLoan => "crypto-loan",
            }
        )
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "crypto-to-cash" => Ok(Mode::CryptoToCash),
            "cash-to-crypto" => Ok(Mode::CashToCrypto),
            "crypto-loan" => Ok(Mode::CryptoLoan),
            _ => Err(anyhow::anyhow!("Invalid conversion mode: {}", s)),
        }
    }
}

/// Which amount field the user edited most recently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastEdited {
    Pay,
    Receive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionState {
    pub pay_amount: String,
    pub receive_amount: String,
    pub from: String,
    pub to: String,
    pub last_edited: LastEdited,
    pub mode: Mode,
}

impl ConversionState {
    pub fn for_mode(mode: Mode) -> Self {
        let (from, to) = mode.default_currencies();
        Self {
            pay_amount: DEFAULT_AMOUNT.to_string(),
            receive_amount: DEFAULT_AMOUNT.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            last_edited: LastEdited::Pay,
            mode,
        }
    }
}

impl Default for ConversionState {
    fn default() -> Self {
        Self::for_mode(Mode::default())
    }
}

pub struct ConversionController {
    engine: Arc<ConversionEngine>,
    state: ConversionState,
}

impl ConversionController {
    /// Starts in `mode` with default amounts, then derives the receive field
    /// from the pay field the way the form does when it first renders.
    pub fn new(engine: Arc<ConversionEngine>, mode: Mode) -> Self {
        let mut controller = Self {
            engine,
            state: ConversionState::for_mode(mode),
        };
        controller.recompute();
        controller
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// Current rate between the selected currencies.
    pub fn rate(&self) -> f64 {
        self.engine.rate(&self.state.from, &self.state.to)
    }

    pub fn on_pay_changed(&mut self, text: &str) {
        self.state.last_edited = LastEdited::Pay;
        self.state.pay_amount = sanitize_amount(text);
        self.recompute();
    }

    pub fn on_receive_changed(&mut self, text: &str) {
        self.state.last_edited = LastEdited::Receive;
        self.state.receive_amount = sanitize_amount(text);
        self.recompute();
    }

    pub fn select_from(&mut self, currency: &str) {
        self.state.from = currency.to_string();
        self.recompute();
    }

    pub fn select_to(&mut self, currency: &str) {
        self.state.to = currency.to_string();
        self.recompute();
    }

    /// Switches tab; everything returns to the mode's defaults.
    pub fn set_mode(&mut self, mode: Mode) {
        debug!(%mode, "Resetting converter for mode");
        self.state = ConversionState::for_mode(mode);
        self.recompute();
    }

    fn recompute(&mut self) {
        let state = &mut self.state;
        match state.last_edited {
            LastEdited::Pay => {
                let amount = parse_amount(&state.pay_amount);
                let received = self.engine.convert(amount, &state.from, &state.to);
                state.receive_amount = self.engine.format(received, &state.to);
            }
            LastEdited::Receive => {
                let amount = parse_amount(&state.receive_amount);
                let rate = self.engine.rate(&state.from, &state.to);
                let paid = if rate != 0.0 { amount / rate } else { amount };
                state.pay_amount = self.engine.format(paid, &state.from);
            }
        }
        debug!(
            pay = %state.pay_amount,
            receive = %state.receive_amount,
            from = %state.from,
            to = %state.to,
            "Recomputed amounts"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(mode: Mode) -> ConversionController {
        ConversionController::new(Arc::new(ConversionEngine::default()), mode)
    }

    #[test]
    fn test_state_defaults() {
        let state = ConversionState::default();
        assert_eq!(state.pay_amount, "1.00");
        assert_eq!(state.receive_amount, "1.00");
        assert_eq!(state.from, "eth");
        assert_eq!(state.to, "ngn");
        assert_eq!(state.last_edited, LastEdited::Pay);

        let cash = ConversionState::for_mode(Mode::CashToCrypto);
        assert_eq!((cash.from.as_str(), cash.to.as_str()), ("ngn", "eth"));
    }

    #[test]
    fn test_initial_recompute() {
        let c = controller(Mode::CryptoToCash);
        assert_eq!(c.state().pay_amount, "1.00");
        assert_eq!(c.state().receive_amount, "1200000.00");
    }

    #[test]
    fn test_pay_edit_updates_receive() {
        let mut c = controller(Mode::CryptoToCash);
        c.on_pay_changed("2");
        assert_eq!(c.state().receive_amount, "2400000.00");
        assert_eq!(c.state().last_edited, LastEdited::Pay);

        c.on_pay_changed("abc");
        assert_eq!(c.state().pay_amount, "");
        assert_eq!(c.state().receive_amount, "0.00");
    }

    #[test]
    fn test_receive_edit_updates_pay() {
        let mut c = controller(Mode::CryptoToCash);
        c.on_receive_changed("600000");
        assert_eq!(c.state().last_edited, LastEdited::Receive);
        assert_eq!(c.state().receive_amount, "600000");
        assert_eq!(c.state().pay_amount, "0.5");
    }

    #[test]
    fn test_round_trip_recovers_pay() {
        let mut c = controller(Mode::CryptoToCash);
        c.on_pay_changed("1.00");
        let received = c.state().receive_amount.clone();
        c.on_receive_changed(&received);
        let pay = parse_amount(&c.state().pay_amount);
        assert!((pay - 1.0).abs() < 1e-6, "recovered {pay}");
    }

    #[test]
    fn test_currency_change_recomputes_from_authoritative_field() {
        let mut c = controller(Mode::CryptoToCash);
        c.on_receive_changed("18000000");
        assert_eq!(c.state().pay_amount, "15");

        c.select_from("btc");
        assert_eq!(c.state().receive_amount, "18000000");
        assert_eq!(c.state().pay_amount, "1");
        assert_eq!(c.state().last_edited, LastEdited::Receive);

        c.on_pay_changed("2");
        c.select_to("eth");
        assert_eq!(c.state().pay_amount, "2");
        assert_eq!(c.state().receive_amount, "30");
    }

    #[test]
    fn test_mode_change_resets() {
        let mut c = controller(Mode::CryptoToCash);
        c.on_receive_changed("5000");
        c.select_from("btc");

        c.set_mode(Mode::CashToCrypto);
        let state = c.state();
        assert_eq!(state.mode, Mode::CashToCrypto);
        assert_eq!(state.from, "ngn");
        assert_eq!(state.to, "eth");
        assert_eq!(state.last_edited, LastEdited::Pay);
        assert_eq!(state.pay_amount, "1.00");
        assert_eq!(state.receive_amount, "0.000001");
    }

    #[test]
    fn test_unknown_pair_uses_fallback() {
        let mut c = controller(Mode::CryptoToCash);
        c.select_from("unknown");
        c.on_pay_changed("5");
        assert_eq!(c.rate(), 1.0);
        assert_eq!(c.state().receive_amount, "5.00");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("crypto_loan".parse::<Mode>().unwrap(), Mode::CryptoLoan);
        assert_eq!("Cash-To-Crypto".parse::<Mode>().unwrap(), Mode::CashToCrypto);
        assert!("loan".parse::<Mode>().is_err());
        assert_eq!(Mode::CryptoLoan.action_label(), "Request loan");
        assert_eq!(Mode::CashToCrypto.to_string(), "cash-to-crypto");
    }
}
