//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are exact decimals (`rust_decimal`), so `24.99 * 5` is `124.95`
//! and cart totals never drift the way floating point sums do.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount of money in a single currency.
///
/// Deserializing goes through [`Price::try_new`], so a negative amount read
/// back from storage is an error rather than a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredPrice")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

/// Wire shape of a price before the sign is checked.
#[derive(Deserialize)]
struct StoredPrice {
    amount: Decimal,
    currency_code: CurrencyCode,
}

impl TryFrom<StoredPrice> for Price {
    type Error = PriceError;

    fn try_from(stored: StoredPrice) -> Result<Self, Self::Error> {
        Self::try_new(stored.amount, stored.currency_code)
    }
}

impl Price {
    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn try_new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// Create a USD price from a whole number of cents.
    ///
    /// ```
    /// use verdant_core::Price;
    ///
    /// assert_eq!(Price::usd_cents(2499).display(), "$24.99");
    /// ```
    #[must_use]
    pub fn usd_cents(cents: u32) -> Self {
        Self {
            amount: Decimal::new(i64::from(cents), 2),
            currency_code: CurrencyCode::USD,
        }
    }

    /// Sum of prices already known to be non-negative.
    pub(crate) fn new_unchecked(amount: Decimal, currency_code: CurrencyCode) -> Self {
        debug_assert!(!amount.is_sign_negative() || amount.is_zero());
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// This price multiplied by a quantity, in the same currency.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }

    /// Format for display with two decimal places (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes the shop prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }
}
