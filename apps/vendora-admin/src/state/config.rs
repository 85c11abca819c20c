//! # Display Configuration
//!
//! How money is shown to the operator.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VENDORA_CURRENCY_SYMBOL`, `VENDORA_CURRENCY_DECIMALS`)
//! 2. Defaults (this file)
//!
//! Read-only after startup, so no lock.

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use tracing::warn;
use vendora_core::Money;

/// Currency display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl DisplayConfig {
    /// Defaults overridden by environment variables.
    pub fn from_env() -> Self {
        let mut config = DisplayConfig::default();

        if let Ok(symbol) = std::env::var("VENDORA_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Ok(decimals) = std::env::var("VENDORA_CURRENCY_DECIMALS") {
            match decimals.parse::<u32>() {
                Ok(d) if d <= 6 => config.currency_decimals = d,
                _ => warn!(value = %decimals, "Ignoring invalid VENDORA_CURRENCY_DECIMALS"),
            }
        }

        config
    }

    /// Formats an amount, rounding half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use vendora_admin::state::DisplayConfig;
    /// use vendora_core::Money;
    ///
    /// let config = DisplayConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let rounded = amount
            .amount()
            .round_dp_with_strategy(self.currency_decimals, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let mut digits = rounded.abs();
        digits.rescale(self.currency_decimals);

        format!("{}{}{}", sign, self.currency_symbol, digits)
    }
}
