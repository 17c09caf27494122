//! Postgres database client definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

/// Non-transactional Postgres database client.
///
/// Takes a pooled [`Connection`] for every operation.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] to take [`Connection`]s from.
    pool: connection::Pool,
}

impl NonTx {
    /// Creates a new [`NonTx`] client from the provided [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self { pool }
    }

    /// Takes a [`Connection`] from the [`connection::Pool`].
    pub(crate) async fn connection(
        &self,
    ) -> Result<connection::Pooled, Traced<database::Error>> {
        self.pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    /// Begins a new transaction, returning the [`Tx`] client performing it.
    ///
    /// # Errors
    ///
    /// If failed to take a [`Connection`] or to begin the transaction.
    pub async fn begin(&self) -> Result<Tx, Traced<database::Error>> {
        let conn = self.connection().await.map_err(tracerr::wrap!())?;
        let tx = connection::Transaction::start(conn)
            .await
            .map_err(tracerr::wrap!())?;
        Ok(Tx(Arc::new(RwLock::new(Some(tx)))))
    }
}

/// Transactional Postgres database client.
///
/// Clones share the same transaction. Dropping the last clone without
/// [`Tx::commit()`]ing rolls the transaction back.
#[derive(Clone, Debug)]
pub struct Tx(Arc<RwLock<Option<connection::Transaction>>>);

impl Tx {
    /// Returns the underlying [`Connection`] of this [`Tx`] client.
    async fn connection(
        &self,
    ) -> RwLockReadGuard<'_, connection::Transaction> {
        RwLockReadGuard::map(self.0.read().await, |tx| {
            tx.as_ref().expect("already committed")
        })
    }

    /// Commits this [`Tx`] client.
    ///
    /// Committing an already committed [`Tx`] does nothing.
    ///
    /// # Errors
    ///
    /// If failed to commit transaction of this [`Tx`] client.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let tx = self.0.write().await.take();
        match tx {
            Some(tx) => tx.commit().await.map_err(tracerr::wrap!()),
            None => Ok(()),
        }
    }
}

impl Connection for NonTx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .exec(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Connection for Tx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .query(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .exec(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }
}
