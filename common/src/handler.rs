//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of `Args`.
///
/// Commands, queries and every infrastructure collaborator (database, audit
/// log, cache) are expressed as [`Handler`]s of the operation they perform.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
