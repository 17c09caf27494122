//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{command, infra::database, query};
use tracerr::{Trace, Traced};

/// Error reported to the user of the application.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] with the provided [`Code`] and `message`.
    fn new(code: Code, msg: &impl ToString) -> Self {
        Self {
            code,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for command::save_placement::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::save_placement::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::Validation(_) => Some(Error::new("INVALID_PLACEMENT", self)),
            E::ReceiptNotExists(_) => {
                Some(Error::new("RECEIPT_NOT_EXISTS", self))
            }
            E::PlacementNotExists(_) => {
                Some(Error::new("PLACEMENT_NOT_EXISTS", self))
            }
        }
    }
}

impl AsError for command::update_receipt::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::update_receipt::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::ReceiptNotExists(_) => {
                Some(Error::new("RECEIPT_NOT_EXISTS", self))
            }
        }
    }
}

impl AsError for command::add_publication_date::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::add_publication_date::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::DateMissing(_) => Some(Error::new("DATE_MISSING", self)),
            E::PlacementNotExists(_) => {
                Some(Error::new("PLACEMENT_NOT_EXISTS", self))
            }
        }
    }
}

impl AsError for query::receipt_preview::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use query::receipt_preview::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::ReceiptNotExists(_) => {
                Some(Error::new("RECEIPT_NOT_EXISTS", self))
            }
            E::NoPlacements(_) => Some(Error::new("NO_PLACEMENTS", self)),
            E::NoPublicationDates(_) => {
                Some(Error::new("NO_PUBLICATION_DATES", self))
            }
        }
    }
}
