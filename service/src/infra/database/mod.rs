//! [`Database`]-related implementations.

#[cfg(test)]
pub mod fake;
#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),

    #[cfg(test)]
    /// Failure injected by a [`fake::InMemory`] database.
    #[display("injected failure")]
    #[from(ignore)]
    Fake,
}

impl Error {
    /// Checks whether this [`Error`] is a violation of an integrity constraint
    /// (uniqueness, foreign key, check and so on).
    #[must_use]
    pub fn is_integrity_violation(&self) -> bool {
        match *self {
            #[cfg(feature = "postgres")]
            Self::Postgres(ref e) => e.is_integrity_violation(),
            #[cfg(test)]
            Self::Fake => false,
        }
    }
}
