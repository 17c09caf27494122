//! [`Connection`] definitions.

use std::{fmt, future::Future};

use futures::{FutureExt as _, TryFutureExt as _};
use ouroboros::self_referencing;
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{self, postgres};

pub use deadpool_postgres::{
    Client as Pooled, CreatePoolError as PoolCreationError, Pool, PoolError,
};
pub use tokio_postgres::Error;

/// Postgres database connection, either transactional or not.
pub trait Connection {
    /// Queries the provided statement with the given parameters and returns the
    /// resulting rows.
    ///
    /// # Errors
    ///
    /// If failed to query the statement.
    fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<Vec<Row>, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;

    /// Queries the provided statement with the given parameters and returns the
    /// optional resulting row.
    ///
    /// # Errors
    ///
    /// If failed to query the statement.
    fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<Option<Row>, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;

    /// Executes the provided statement with the given parameters and returns
    /// the number of affected rows.
    ///
    /// # Errors
    ///
    /// If failed to execute the statement.
    fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<u64, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;
}

/// [`Pooled`] connection with a started transaction.
#[self_referencing]
pub struct Transaction {
    /// [`Pooled`] connection the transaction is started in.
    pooled: Pooled,

    /// Started transaction, [`None`] once committed.
    #[borrows(mut pooled)]
    #[not_covariant]
    tx: Option<deadpool_postgres::Transaction<'this>>,
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[expect(
            clippy::redundant_closure_for_method_calls,
            reason = "different variance, see \
                      https://doc.rust-lang.org/nomicon/subtyping.html#variance"
        )]
        let committed = self.with_tx(|tx| tx.is_none());
        f.debug_struct("Transaction")
            .field("committed", &committed)
            .finish_non_exhaustive()
    }
}

impl Transaction {
    /// Starts a new [`Transaction`] in the provided [`Pooled`] connection.
    ///
    /// # Errors
    ///
    /// If failed to start the transaction.
    pub async fn start(
        pooled: Pooled,
    ) -> Result<Self, Traced<database::Error>> {
        Self::try_new_async_send(pooled, |c| {
            c.transaction().map_ok(Some).boxed()
        })
        .await
        .map_err(tracerr::from_and_wrap!(=> postgres::Error))
        .map_err(tracerr::map_from)
    }

    /// Returns the client of the started transaction.
    fn client(&self) -> &tokio_postgres::Client {
        self.with_tx(|tx| tx.as_ref().expect("already committed").client())
    }

    /// Commits this [`Transaction`].
    ///
    /// # Errors
    ///
    /// If failed to commit this [`Transaction`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub async fn commit(mut self) -> Result<(), Traced<database::Error>> {
        #[expect(
            clippy::redundant_closure_for_method_calls,
            reason = "different variance, see \
                      https://doc.rust-lang.org/nomicon/subtyping.html#variance"
        )]
        self.with_tx_mut(|tx| tx.take())
            .expect("already committed")
            .commit()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

/// Implements [`Connection`] for the provided type, delegating to the
/// [`tokio_postgres::Client`] returned by the accessor.
macro_rules! impl_connection {
    ($ty:ty, |$this:ident| $client:expr) => {
        impl Connection for $ty {
            async fn query<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<Vec<Row>, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                let $this = self;
                let client: &tokio_postgres::Client = $client;
                client
                    .query(stmt, params)
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)
            }

            async fn query_opt<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<Option<Row>, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                let $this = self;
                let client: &tokio_postgres::Client = $client;
                client
                    .query_opt(stmt, params)
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)
            }

            async fn exec<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<u64, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                let $this = self;
                let client: &tokio_postgres::Client = $client;
                client
                    .execute(stmt, params)
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)
            }
        }
    };
}

impl_connection!(Pooled, |this| this);
impl_connection!(Transaction, |this| this.client());
