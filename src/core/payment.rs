//! Send-payment confirmation breakdown

use super::input::{parse_amount, strip_non_numeric};
use serde::Serialize;

pub const NETWORK_FEE: f64 = 0.0021;

/// Breakdown shown on the send confirmation screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub currency: String,
    pub amount: String,
    pub fee: f64,
    pub total: f64,
}

impl PaymentSummary {
    pub fn new(amount_text: &str, currency: &str) -> Self {
        let amount = strip_non_numeric(amount_text);
        let total = parse_amount(&amount) + NETWORK_FEE;
        Self {
            currency: currency.to_uppercase(),
            amount,
            fee: NETWORK_FEE,
            total,
        }
    }

    pub fn fee_display(&self) -> String {
        format!("{} {}", self.fee, self.currency)
    }

    pub fn total_display(&self) -> String {
        format!("{:.4} {}", self.total, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_totals() {
        let summary = PaymentSummary::new("0.5", "eth");
        assert_eq!(summary.amount, "0.5");
        assert_eq!(summary.fee_display(), "0.0021 ETH");
        assert_eq!(summary.total_display(), "0.5021 ETH");
    }

    #[test]
    fn test_empty_or_garbage_amount() {
        assert_eq!(PaymentSummary::new("", "eth").total_display(), "0.0021 ETH");
        assert_eq!(PaymentSummary::new("abc", "eth").amount, "");
        assert_eq!(
            PaymentSummary::new("1.2.3", "eth").total_display(),
            "1.2021 ETH"
        );
    }
}
