//! [`Cache`]-related definitions.

use std::{
    convert::Infallible,
    sync::Arc,
    time::{Duration, Instant},
};

use common::operations::{By, Delete, Insert, Select};
use dashmap::DashMap;
use derive_more::{AsRef, Display};

use crate::domain::receipt;
#[cfg(doc)]
use crate::domain::{Placement, Receipt};

/// Key-value cache of derived values.
pub use common::Handler as Cache;

/// [`Cache`] key.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Key(String);

impl Key {
    /// [`Key`] of the total amount charged for all the [`Placement`]s of the
    /// provided [`Receipt`].
    #[must_use]
    pub fn total_amount(receipt_id: receipt::Id) -> Self {
        Self(format!("total-amount-{receipt_id}"))
    }

    /// [`Key`] of the total amount charged for all the [`Placement`]s of the
    /// provided [`Receipt`], spelled in words.
    #[must_use]
    pub fn total_amount_in_words(receipt_id: receipt::Id) -> Self {
        Self(format!("total-amount-in-words-{receipt_id}"))
    }

    /// All the total [`Key`]s of the provided [`Receipt`].
    #[must_use]
    pub fn totals(receipt_id: receipt::Id) -> [Self; 2] {
        [
            Self::total_amount(receipt_id),
            Self::total_amount_in_words(receipt_id),
        ]
    }
}

/// [`Cache`] entry to be stored.
#[derive(Clone, Debug)]
pub struct Entry {
    /// [`Key`] of this [`Entry`].
    pub key: Key,

    /// Cached value.
    pub value: String,

    /// Period this [`Entry`] stays cached for.
    pub ttl: Duration,
}

/// In-memory [`Cache`] with expiring entries.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<DashMap<Key, Stored>>);

/// Value stored in a [`Memory`] cache.
#[derive(Clone, Debug)]
struct Stored {
    /// Cached value.
    value: String,

    /// Moment the value expires at, if ever.
    expires_at: Option<Instant>,
}

impl Stored {
    /// Checks whether this [`Stored`] value is expired at the provided
    /// moment.
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl Cache<Select<By<Option<String>, Key>>> for Memory {
    type Ok = Option<String>;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = by.into_inner();
        let now = Instant::now();

        if let Some(stored) = self.0.get(&key) {
            if !stored.is_expired(now) {
                return Ok(Some(stored.value.clone()));
            }
        }
        drop(self.0.remove_if(&key, |_, s| s.is_expired(now)));

        Ok(None)
    }
}

impl Cache<Insert<Entry>> for Memory {
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Insert(entry): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        let Entry { key, value, ttl } = entry;

        let expires_at = Instant::now().checked_add(ttl);
        drop(self.0.insert(key, Stored { value, expires_at }));

        Ok(())
    }
}

impl Cache<Delete<Key>> for Memory {
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.0.remove(&key));
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{By, Delete, Insert, Select};

    use crate::{domain::receipt, infra::Cache as _};

    use super::{Entry, Key, Memory};

    fn entry(key: Key, value: &str, ttl: Duration) -> Entry {
        Entry {
            key,
            value: value.to_owned(),
            ttl,
        }
    }

    #[test]
    fn formats_total_keys() {
        let id = receipt::Id::new();

        assert_eq!(
            Key::totals(id).map(|k| k.to_string()),
            [format!("total-amount-{id}"), format!("total-amount-in-words-{id}")],
        );
    }

    #[tokio::test]
    async fn gets_set_and_deletes() {
        let cache = Memory::default();
        let key = Key::total_amount(receipt::Id::new());

        cache
            .execute(Insert(entry(key.clone(), "736", Duration::from_secs(60))))
            .await
            .unwrap();
        assert_eq!(
            cache.execute(Select(By::new(key.clone()))).await.unwrap(),
            Some("736".to_owned()),
        );

        cache.execute(Delete(key.clone())).await.unwrap();
        assert_eq!(cache.execute(Select(By::new(key))).await.unwrap(), None);
    }

    #[tokio::test]
    async fn expires_entries() {
        let cache = Memory::default();
        let key = Key::total_amount_in_words(receipt::Id::new());

        cache
            .execute(Insert(entry(key.clone(), "One", Duration::ZERO)))
            .await
            .unwrap();

        assert_eq!(cache.execute(Select(By::new(key))).await.unwrap(), None);
    }
}
