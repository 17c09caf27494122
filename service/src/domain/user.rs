//! Definitions of an employee operating the system.
//!
//! Employees are authenticated outside of this service, so only their
//! identity is known here: it attributes [`Receipt`]s and [`ChangeRecord`]s.

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{ChangeRecord, Receipt};

/// ID of an employee.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
