//! Type-safe money representation in minor currency units.
//!
//! Catalog prices are stored as whole minor units (e.g., cents for USD) and
//! only converted to decimal form for display. Arithmetic stays in integer
//! space so totals never accumulate floating-point error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in minor currency units (e.g., cents).
///
/// `Money` carries no currency of its own; the storefront operates in a
/// single display currency supplied by configuration at render time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a money value from minor units.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whether the amount is negative.
    ///
    /// Catalog prices must be non-negative; this is checked when a catalog
    /// snapshot is built.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// Checked multiplication by a quantity.
    #[must_use]
    pub const fn checked_mul(self, quantity: i64) -> Option<Self> {
        match self.0.checked_mul(quantity) {
            Some(product) => Some(Self(product)),
            None => None,
        }
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self, currency: CurrencyCode) -> String {
        let amount = Decimal::new(self.0, 2);
        format!("{}{amount:.2}", currency.symbol())
    }
}

/// ISO 4217 currency codes supported for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 code string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    /// Parse an ISO 4217 code string (case-insensitive).
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Some(Self::USD),
            "EUR" => Some(Self::EUR),
            "GBP" => Some(Self::GBP),
            "CAD" => Some(Self::CAD),
            "AUD" => Some(Self::AUD),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_roundtrip() {
        let price = Money::from_cents(1999);
        assert_eq!(price.cents(), 1999);
    }

    #[test]
    fn test_display_usd() {
        assert_eq!(Money::from_cents(1999).display(CurrencyCode::USD), "$19.99");
        assert_eq!(Money::from_cents(1200).display(CurrencyCode::USD), "$12.00");
        assert_eq!(Money::ZERO.display(CurrencyCode::USD), "$0.00");
    }

    #[test]
    fn test_display_other_currencies() {
        let price = Money::from_cents(500);
        assert_eq!(price.display(CurrencyCode::EUR), "\u{20ac}5.00");
        assert_eq!(price.display(CurrencyCode::GBP), "\u{a3}5.00");
        assert_eq!(price.display(CurrencyCode::CAD), "$5.00");
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_cents(1200);
        assert_eq!(price.checked_mul(3), Some(Money::from_cents(3600)));
        assert_eq!(
            price.checked_add(Money::from_cents(50)),
            Some(Money::from_cents(1250))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_is_negative() {
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!Money::from_cents(1).is_negative());
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!(CurrencyCode::parse("usd"), Some(CurrencyCode::USD));
        assert_eq!(CurrencyCode::parse("GBP"), Some(CurrencyCode::GBP));
        assert_eq!(CurrencyCode::parse("JPY"), None);
    }
}
