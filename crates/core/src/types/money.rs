//! Money values as decimal strings with currency code.
//!
//! The commerce API transmits monetary amounts as decimal strings to preserve
//! precision; this type keeps that representation and offers checked access
//! to the numeric value via `rust_decimal`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

/// Errors from interpreting a money value.
#[derive(Debug, Error)]
pub enum MoneyError {
    /// The amount string is not a valid decimal.
    #[error("invalid money amount: {0:?}")]
    InvalidAmount(String),
}

impl Money {
    /// Create a new money value.
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Parse the amount as a decimal.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidAmount` if the amount string does not
    /// parse as a decimal.
    pub fn decimal(&self) -> Result<Decimal, MoneyError> {
        self.amount
            .parse::<Decimal>()
            .map_err(|_| MoneyError::InvalidAmount(self.amount.clone()))
    }

    /// Format for display (e.g., "$19.99", "€5.00", "12.50 SEK").
    ///
    /// Falls back to the raw amount string when it does not parse.
    #[must_use]
    pub fn display(&self) -> String {
        let Ok(amount) = self.decimal() else {
            return format!("{} {}", self.amount, self.currency_code);
        };
        match currency_symbol(&self.currency_code) {
            Some(symbol) => format!("{symbol}{amount:.2}"),
            None => format!("{amount:.2} {}", self.currency_code),
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Symbol for the common currencies the store trades in.
fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_parses_valid_amount() {
        let money = Money::new("19.99", "USD");
        assert_eq!(money.decimal().unwrap(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        let money = Money::new("nineteen", "USD");
        assert!(matches!(money.decimal(), Err(MoneyError::InvalidAmount(_))));
    }

    #[test]
    fn test_display_dollar_currencies() {
        assert_eq!(Money::new("19.99", "USD").display(), "$19.99");
        assert_eq!(Money::new("5", "CAD").display(), "$5.00");
    }

    #[test]
    fn test_display_unknown_currency_uses_code() {
        assert_eq!(Money::new("12.5", "SEK").display(), "12.50 SEK");
    }

    #[test]
    fn test_display_unparseable_falls_back_to_raw() {
        assert_eq!(Money::new("n/a", "USD").display(), "n/a USD");
    }

    #[test]
    fn test_serde_roundtrip() {
        let money = Money::new("42.00", "EUR");
        let json = serde_json::to_string(&money).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(money, back);
    }
}
