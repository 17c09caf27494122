//! [`AuditLog`]-related definitions.

use derive_more::{Display, Error as StdError};

#[cfg(doc)]
use crate::domain::ChangeRecord;
use crate::infra::database;

/// Append-only log of [`ChangeRecord`]s.
pub use common::Handler as AuditLog;

/// Error of appending to an [`AuditLog`].
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Appended entry conflicts with the already logged ones.
    #[display("Audit entry conflicts with the logged ones: {_0}")]
    Conflict(database::Error),

    /// [`Database`] backing the [`AuditLog`] failed.
    ///
    /// [`Database`]: crate::infra::Database
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

impl From<database::Error> for Error {
    fn from(e: database::Error) -> Self {
        if e.is_integrity_violation() {
            Self::Conflict(e)
        } else {
            Self::Db(e)
        }
    }
}
