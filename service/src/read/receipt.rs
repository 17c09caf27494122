//! [`Receipt`]-related read definitions.

use common::{Date, Money};
use derive_more::{Deref, From, Into};

use crate::domain::{placement::AmountInWords, Placement, Receipt};

/// Sum of the amounts charged for all the [`Placement`]s of a [`Receipt`].
#[derive(Clone, Copy, Debug, Default, Deref, Eq, From, Into, PartialEq)]
pub struct TotalAmount(pub Money);

/// Total amount charged for a [`Receipt`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Total {
    /// Charged amount.
    pub amount: Money,

    /// Charged amount spelled in words.
    pub in_words: AmountInWords,
}

impl From<TotalAmount> for Total {
    fn from(TotalAmount(amount): TotalAmount) -> Self {
        Self {
            amount,
            in_words: AmountInWords::spell(amount),
        }
    }
}

/// Printable preview of a [`Receipt`].
#[derive(Clone, Debug)]
pub struct Preview {
    /// Previewed [`Receipt`].
    pub receipt: Receipt,

    /// [`Line`]s of the [`Receipt`].
    pub lines: Vec<Line>,

    /// [`Total`] amount charged for the [`Receipt`].
    pub total: Total,
}

/// Single [`Placement`] line of a [`Preview`].
#[derive(Clone, Debug)]
pub struct Line {
    /// [`Placement`] of this [`Line`].
    pub placement: Placement,

    /// [`Date`]s the [`Placement`] is published on, in ascending order.
    pub dates: Vec<Date>,
}
