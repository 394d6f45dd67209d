//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive as JSON numbers; they are held as [`Decimal`] so
//! cart totals never pick up floating point drift. Prices display in
//! rupees (`Rs 12.5`), matching how the storefront has always shown them.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the storefront's single currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_whole(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// Create a price from minor units (paise), e.g. `1999` is `19.99`.
    #[must_use]
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, 2))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a quantity.
    ///
    /// Quantities are signed because the cart accepts whatever quantity it is
    /// given, including zero and negatives. Results beyond the `Decimal`
    /// range clamp to its bounds.
    #[must_use]
    pub fn times(self, quantity: i64) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs {}", self.0.normalize())
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Decimal>().map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_whole(10).times(2), Price::from_whole(5).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_whole(25));
    }

    #[test]
    fn test_times_accepts_non_positive_quantities() {
        assert_eq!(Price::from_whole(10).times(0), Price::ZERO);
        assert_eq!(Price::from_whole(10).times(-2), Price::from_whole(-20));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Price::new(Decimal::MAX).times(2);
        assert_eq!(huge, Price::new(Decimal::MAX));
        assert_eq!(huge + Price::from_whole(1), Price::new(Decimal::MAX));
        assert_eq!(
            Price::from_whole(10).times(i64::MAX),
            Price::new(Decimal::from(i64::MAX) * Decimal::TEN)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_minor(1999).to_string(), "Rs 19.99");
        assert_eq!(Price::from_minor(1250).to_string(), "Rs 12.5");
        assert_eq!(Price::from_whole(549).to_string(), "Rs 549");
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("9.99").unwrap();
        assert_eq!(price, Price::from_minor(999));

        let price: Price = serde_json::from_str("1899").unwrap();
        assert_eq!(price, Price::from_whole(1899));
    }

    #[test]
    fn test_parse() {
        assert_eq!(" 12.50 ".parse::<Price>().unwrap(), Price::from_minor(1250));
        assert!("twelve".parse::<Price>().is_err());
    }
}
