//! [`Cache`] implementations over the `cache_entries` table.
//!
//! Keeps derived totals across separate [`Service`] instances sharing the
//! same database.
//!
//! [`Service`]: crate::Service

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::infra::{
    cache::{Entry, Key},
    database::{self, postgres::Connection, Postgres},
    Cache,
};

impl<C> Cache<Select<By<Option<String>, Key>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<String>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = by.into_inner();
        let key: &str = key.as_ref();

        const SQL: &str = "\
            SELECT value \
            FROM cache_entries \
            WHERE key = $1::TEXT \
              AND expires_at > NOW()";
        Ok(self
            .query_opt(SQL, &[&key])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| row.get("value")))
    }
}

impl<C> Cache<Insert<Entry>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        let Entry { key, value, ttl } = entry;
        let key: &str = key.as_ref();
        let ttl = ttl.as_secs_f64();

        const SQL: &str = "\
            INSERT INTO cache_entries (key, value, expires_at) \
            VALUES ($1::TEXT, $2::TEXT, \
                    NOW() + make_interval(secs => $3::FLOAT8)) \
            ON CONFLICT (key) DO UPDATE \
            SET value = EXCLUDED.value, \
                expires_at = EXCLUDED.expires_at";
        self.exec(SQL, &[&key, &value, &ttl])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Cache<Delete<Key>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        let key: &str = key.as_ref();

        const SQL: &str = "\
            DELETE FROM cache_entries \
            WHERE key = $1::TEXT \
               OR expires_at <= NOW()";
        self.exec(SQL, &[&key])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
