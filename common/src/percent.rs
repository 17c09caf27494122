//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided values is
    /// not less than `0` and not greater than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns the value of this [`Percent`].
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Calculates this [`Percent`] of the provided `amount`.
    #[must_use]
    pub fn of(self, amount: Decimal) -> Decimal {
        amount * self.0 / Decimal::ONE_HUNDRED
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}
