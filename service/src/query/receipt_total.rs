//! [`Query`] of the total amount charged for a [`Receipt`].

use std::{fmt, str::FromStr as _};

use common::{
    operations::{By, Insert, Select},
    Money,
};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{Placement, Receipt};
use crate::{
    domain::{placement::AmountInWords, receipt},
    infra::{cache, database, Cache, Database},
    read::receipt::{Total, TotalAmount},
    Service,
};

use super::Query;

/// [`Query`] of the [`Total`] amount charged for all the [`Placement`]s of a
/// [`Receipt`].
///
/// Reads the [`Total`] from the [`Cache`] first, falling back to summing the
/// [`Placement`]s. A non-zero sum is cached for the configured period.
#[derive(Clone, Copy, Debug)]
pub struct ReceiptTotal(pub receipt::Id);

impl<Db, Ch> Query<ReceiptTotal> for Service<Db, Ch>
where
    Db: Database<
        Select<By<TotalAmount, receipt::Id>>,
        Ok = TotalAmount,
        Err = Traced<database::Error>,
    >,
    Ch: Cache<
            Select<By<Option<String>, cache::Key>>,
            Ok = Option<String>,
            Err: fmt::Display,
        > + Cache<Insert<cache::Entry>, Ok = (), Err: fmt::Display>,
{
    type Ok = Total;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ReceiptTotal(receipt_id): ReceiptTotal,
    ) -> Result<Self::Ok, Self::Err> {
        if let Some(total) = self.cached_total(receipt_id).await {
            return Ok(total);
        }

        let total = Total::from(
            self.database()
                .execute(Select(By::<TotalAmount, _>::new(receipt_id)))
                .await
                .map_err(tracerr::wrap!())?,
        );
        if !total.amount.is_zero() {
            self.cache_total(receipt_id, &total).await;
        }

        Ok(total)
    }
}

impl<Db, Ch> Service<Db, Ch> {
    /// Reads the cached [`Total`] of the provided [`Receipt`], if any.
    ///
    /// Both the amount and its spelling must be cached, otherwise [`None`] is
    /// returned. Failures are logged and treated as a cache miss.
    async fn cached_total(&self, receipt_id: receipt::Id) -> Option<Total>
    where
        Ch: Cache<
            Select<By<Option<String>, cache::Key>>,
            Ok = Option<String>,
            Err: fmt::Display,
        >,
    {
        let [amount_key, words_key] = cache::Key::totals(receipt_id);

        let mut values = Vec::with_capacity(2);
        for key in [amount_key, words_key] {
            match self.cache().execute(Select(By::new(key.clone()))).await {
                Ok(v) => values.push(v?),
                Err(e) => {
                    log::warn!("failed to read `{key}` cache entry: {e}");
                    return None;
                }
            }
        }
        let [amount, words] = <[String; 2]>::try_from(values).ok()?;

        let total = Money::from_str(&amount)
            .ok()
            .zip(AmountInWords::new(words))
            .map(|(amount, in_words)| Total { amount, in_words });
        if total.is_none() {
            log::warn!(
                "malformed cached total of `Receipt(id: {receipt_id})`, \
                 ignoring",
            );
        }
        total
    }

    /// Caches the provided [`Total`] of the provided [`Receipt`].
    ///
    /// Failures are logged and never propagated.
    async fn cache_total(&self, receipt_id: receipt::Id, total: &Total)
    where
        Ch: Cache<Insert<cache::Entry>, Ok = (), Err: fmt::Display>,
    {
        let ttl = self.config().totals_ttl;
        let entries = [
            (cache::Key::total_amount(receipt_id), total.amount.to_string()),
            (
                cache::Key::total_amount_in_words(receipt_id),
                total.in_words.to_string(),
            ),
        ];
        for (key, value) in entries {
            let entry = cache::Entry {
                key: key.clone(),
                value,
                ttl,
            };
            if let Err(e) = self.cache().execute(Insert(entry)).await {
                log::warn!("failed to cache `{key}` entry: {e}");
            }
        }
    }
}

/// Error of [`ReceiptTotal`] [`Query`] execution.
pub type ExecutionError = database::Error;
