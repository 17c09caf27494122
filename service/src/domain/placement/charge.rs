//! [`Charge`] calculation of a [`Placement`].

use common::{Money, Percent};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

#[cfg(doc)]
use super::Placement;
use super::{Extra, Rate};

/// Amount charged to a client for a [`Placement`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Charge {
    /// Charged amount.
    pub amount: Money,

    /// Charged amount spelled in words.
    pub in_words: AmountInWords,
}

impl Charge {
    /// Creates a new [`Charge`] of the provided `amount`.
    #[must_use]
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            in_words: AmountInWords::spell(amount),
        }
    }

    /// Calculates a [`Charge`] for the provided [`Rate`] and [`Extra`] lines
    /// or words.
    ///
    /// The `tax` applies to the cost of the [`Extra`] lines or words only, and
    /// only when both their number and cost are non-zero. Otherwise, the
    /// [`Rate`] is charged as is.
    #[must_use]
    pub fn calculate(rate: Rate, extra: Option<Extra>, tax: Percent) -> Self {
        let rate = Decimal::from(i32::from(rate));
        let amount = match extra.filter(|e| !e.is_zero()) {
            Some(extra) => {
                let cost = extra.cost();
                rate + cost + tax.of(cost)
            }
            None => rate,
        };
        Self::new(Money::new(amount))
    }
}

/// [`Money`] amount spelled in title-cased English words.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct AmountInWords(String);

impl AmountInWords {
    /// Creates a new [`AmountInWords`] if the given `words` are valid.
    #[must_use]
    pub fn new(words: impl Into<String>) -> Option<Self> {
        let words = words.into();
        Self::check(&words).then_some(Self(words))
    }

    /// Checks whether the given `words` are a valid [`AmountInWords`].
    fn check(words: impl AsRef<str>) -> bool {
        let words = words.as_ref();
        words.trim() == words && !words.is_empty()
    }

    /// Spells the provided [`Money`] amount.
    #[must_use]
    pub fn spell(amount: Money) -> Self {
        Self(amount.to_words())
    }
}
