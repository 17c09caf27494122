//! [`Money`]-related definitions.

use std::{fmt, iter, ops, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::words;

/// Amount of money, kept with [`Money::SCALE`] fractional digits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Money(Decimal);

impl Money {
    /// Number of fractional digits a [`Money`] amount is kept with.
    pub const SCALE: u32 = 3;

    /// Zero [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Money`] out of the provided `amount`, rounding it to
    /// [`Money::SCALE`] fractional digits.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp_with_strategy(
            Self::SCALE,
            RoundingStrategy::MidpointAwayFromZero,
        ))
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Money`] is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Spells this [`Money`] amount in title-cased English words.
    ///
    /// See [`words::spell()`] for details.
    #[must_use]
    pub fn to_words(self) -> String {
        words::spell(self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self::new)
            .map_err(|_| "invalid amount")
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45").unwrap(),
            Money::new(decimal("123.45")),
        );
        assert_eq!(Money::from_str("736").unwrap(), Money::from(736));
        assert_eq!(Money::from_str(" 736.000 ").unwrap(), Money::from(736));

        assert!(Money::from_str("123.45USD").is_err());
        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("seven").is_err());
    }

    #[test]
    fn keeps_three_fractional_digits() {
        assert_eq!(Money::new(decimal("1.0005")), Money::new(decimal("1.001")));
        assert_eq!(Money::new(decimal("1.0004")), Money::new(decimal("1")));
        assert_eq!(Money::new(decimal("-1.0005")).to_string(), "-1.001");
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::new(decimal("123.45")).to_string(), "123.45");
        assert_eq!(Money::new(decimal("123.450")).to_string(), "123.45");
        assert_eq!(Money::new(decimal("736.000")).to_string(), "736");
        assert_eq!(Money::from(736).to_string(), "736");
        assert_eq!(Money::ZERO.to_string(), "0");
    }

    #[test]
    fn sums() {
        let total: Money = [
            Money::from(500),
            Money::new(decimal("236.5")),
            Money::new(decimal("0.125")),
        ]
        .into_iter()
        .sum();

        assert_eq!(total, Money::new(decimal("736.625")));
        assert_eq!(std::iter::empty::<Money>().sum::<Money>(), Money::ZERO);
    }

    #[test]
    fn to_words() {
        assert_eq!(Money::from(1000).to_words(), "One Thousand");
        assert_eq!(
            Money::new(decimal("736.500")).to_words(),
            "Seven Hundred Thirty-Six Point Five",
        );
    }
}
