//! [`Command`] for saving a [`Placement`].

use std::fmt;

use common::operations::{
    By, Commit, Delete, Insert, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::placement::{ExtraUnitCost, ExtraUnits};
use crate::{
    domain::{
        placement::{self, save::Saved, Draft},
        receipt, user, ChangeRecord, Placement, Receipt,
    },
    infra::{audit, cache, database, AuditLog, Cache, Database},
    Service,
};

use super::Command;

/// [`Command`] for saving a [`Placement`].
///
/// Derives the [`placement::Charge`] of the [`Placement`] and records the
/// changes of its tracked fields into the [`AuditLog`] on update. Invalidates
/// the cached totals of the [`Receipt`] on success.
#[derive(Clone, Debug)]
pub struct SavePlacement {
    /// ID of the [`Placement`] to update.
    ///
    /// [`None`] creates a new [`Placement`].
    pub placement_id: Option<placement::Id>,

    /// ID of the [`Receipt`] the [`Placement`] belongs to.
    pub receipt_id: receipt::Id,

    /// [`placement::PaperName`] of the [`Placement`].
    pub paper: placement::PaperName,

    /// [`placement::Caption`] of the [`Placement`].
    pub caption: placement::Caption,

    /// [`placement::Edition`]s of the [`Placement`].
    pub edition: placement::Edition,

    /// [`placement::Rate`] of the [`Placement`].
    pub rate: placement::Rate,

    /// [`ExtraUnits`] of the [`Placement`], if any.
    pub extra_units: Option<placement::ExtraUnits>,

    /// [`ExtraUnitCost`] of the [`Placement`], if any.
    pub extra_unit_cost: Option<placement::ExtraUnitCost>,

    /// ID of the employee saving the [`Placement`].
    pub acting_user: user::Id,
}

impl<Db, Ch> Command<SavePlacement> for Service<Db, Ch>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + AuditLog<Insert<ChangeRecord>, Ok = (), Err = Traced<audit::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Receipt>, receipt::Id>>,
            Ok = Option<Receipt>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Placement>, placement::Id>>,
            Ok = Option<Placement>,
            Err = Traced<database::Error>,
        > + Database<Insert<Placement>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Placement>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
    Ch: Cache<Delete<cache::Key>, Ok = (), Err: fmt::Display>,
{
    type Ok = Saved;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SavePlacement) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SavePlacement {
            placement_id,
            receipt_id,
            paper,
            caption,
            edition,
            rate,
            extra_units,
            extra_unit_cost,
            acting_user,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Select(By::<Option<Receipt>, _>::new(receipt_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReceiptNotExists(receipt_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let previous = if let Some(id) = placement_id {
            let placement = tx
                .execute(Select(By::<Option<Placement>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .filter(|p| p.receipt_id == receipt_id)
                .ok_or(E::PlacementNotExists(id))
                .map_err(tracerr::wrap!())?;
            Some(placement)
        } else {
            None
        };

        let draft = Draft {
            id: placement_id.unwrap_or_else(placement::Id::new),
            receipt_id,
            paper,
            caption,
            edition,
            rate,
            extra_units,
            extra_unit_cost,
        };
        let saved = placement::save::process(
            previous.as_ref(),
            draft,
            acting_user,
            self.config().gst_rate,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        if previous.is_some() {
            tx.execute(Update(saved.placement.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        } else {
            tx.execute(Insert(saved.placement.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.log_changes(&saved.changes).await;
        self.invalidate_totals(receipt_id).await;

        Ok(saved)
    }
}

impl<Db, Ch> Service<Db, Ch> {
    /// Appends the provided [`ChangeRecord`]s to the [`AuditLog`].
    ///
    /// The first failure drops the rest of the [`ChangeRecord`]s, and is
    /// logged without being propagated.
    async fn log_changes(&self, changes: &[ChangeRecord])
    where
        Db: AuditLog<
            Insert<ChangeRecord>,
            Ok = (),
            Err = Traced<audit::Error>,
        >,
    {
        for (n, record) in changes.iter().enumerate() {
            if let Err(e) = self.database().execute(Insert(record.clone())).await
            {
                log::warn!(
                    "failed to log changes of `Placement(id: {})`, \
                     dropped {} `ChangeRecord`s: {e}",
                    record.placement_id,
                    changes.len() - n,
                );
                break;
            }
        }
    }
}

/// Error of [`SavePlacement`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Placement`] is invalid.
    #[display("{_0}")]
    Validation(placement::ValidationError),

    /// [`Receipt`] doesn't exist.
    #[display("`Receipt(id: {_0})` does not exist")]
    #[from(ignore)]
    ReceiptNotExists(#[error(not(source))] receipt::Id),

    /// [`Placement`] doesn't exist in the [`Receipt`].
    #[display("`Placement(id: {_0})` does not exist")]
    #[from(ignore)]
    PlacementNotExists(#[error(not(source))] placement::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Insert, Select},
        Money,
    };

    use crate::{
        domain::{
            change_record::Field,
            placement::{self, Caption, Edition, PaperName, Rate},
            receipt, user,
        },
        infra::{cache, database::fake::InMemory, Cache as _},
        Command as _, Config, Service,
    };

    use super::{ExecutionError, SavePlacement};

    type Svc = Service<InMemory, cache::Memory>;

    fn service() -> Svc {
        Service::new(
            Config::default(),
            InMemory::default(),
            cache::Memory::default(),
        )
    }

    fn cmd(
        receipt_id: receipt::Id,
        rate: i32,
        extra_units: Option<i32>,
        extra_unit_cost: Option<i32>,
    ) -> SavePlacement {
        SavePlacement {
            placement_id: None,
            receipt_id,
            paper: PaperName::new("Dainik Bhaskar").unwrap(),
            caption: Caption::new("Matrimonial").unwrap(),
            edition: Edition::new("Jaipur").unwrap(),
            rate: Rate::new(rate).unwrap(),
            extra_units: extra_units
                .map(|u| placement::ExtraUnits::new(u).unwrap()),
            extra_unit_cost: extra_unit_cost
                .map(|c| placement::ExtraUnitCost::new(c).unwrap()),
            acting_user: user::Id::new(),
        }
    }

    async fn cache_totals(svc: &Svc, receipt_id: receipt::Id) {
        for key in cache::Key::totals(receipt_id) {
            svc.cache()
                .execute(Insert(cache::Entry {
                    key,
                    value: "stale".to_owned(),
                    ttl: Duration::from_secs(60),
                }))
                .await
                .unwrap();
        }
    }

    async fn cached_totals(
        svc: &Svc,
        receipt_id: receipt::Id,
    ) -> Vec<Option<String>> {
        let mut values = Vec::new();
        for key in cache::Key::totals(receipt_id) {
            values.push(svc.cache().execute(Select(By::new(key))).await.unwrap());
        }
        values
    }

    #[tokio::test]
    async fn creates_placement() {
        let svc = service();
        let receipt = svc.database().seed_receipt();

        let saved = svc
            .execute(cmd(receipt.id, 500, Some(10), Some(20)))
            .await
            .unwrap();

        assert_eq!(saved.placement.charge.amount, Money::from(736));
        assert_eq!(
            saved.placement.charge.in_words.to_string(),
            "Seven Hundred Thirty-Six",
        );
        assert!(saved.changes.is_empty());

        let state = svc.database().state();
        assert_eq!(state.placements.len(), 1);
        assert!(state.change_records.is_empty());
    }

    #[tokio::test]
    async fn records_changes_on_update() {
        let svc = service();
        let receipt = svc.database().seed_receipt();
        let created = svc
            .execute(cmd(receipt.id, 500, None, None))
            .await
            .unwrap()
            .placement;

        let saved = svc
            .execute(SavePlacement {
                placement_id: Some(created.id),
                ..cmd(receipt.id, 600, None, None)
            })
            .await
            .unwrap();

        assert_eq!(saved.placement.id, created.id);
        assert_eq!(saved.placement.charge.amount, Money::from(600));

        let state = svc.database().state();
        assert_eq!(state.placements.len(), 1);
        assert_eq!(state.change_records.len(), 1);
        assert_eq!(state.change_records[0].field, Field::Rate);
        assert_eq!(
            state.change_records[0].message.to_string(),
            "Previous rate: 500 | Current rate: 600",
        );
    }

    #[tokio::test]
    async fn records_nothing_without_changes() {
        let svc = service();
        let receipt = svc.database().seed_receipt();
        let created = svc
            .execute(cmd(receipt.id, 500, Some(10), Some(20)))
            .await
            .unwrap()
            .placement;

        let saved = svc
            .execute(SavePlacement {
                placement_id: Some(created.id),
                ..cmd(receipt.id, 500, Some(10), Some(20))
            })
            .await
            .unwrap();

        assert!(saved.changes.is_empty());
        assert!(svc.database().state().change_records.is_empty());
    }

    #[tokio::test]
    async fn invalidates_totals_on_every_save() {
        let svc = service();
        let receipt = svc.database().seed_receipt();

        cache_totals(&svc, receipt.id).await;
        let created = svc
            .execute(cmd(receipt.id, 500, None, None))
            .await
            .unwrap()
            .placement;
        assert_eq!(cached_totals(&svc, receipt.id).await, [None, None]);

        // Unchanged amount still invalidates.
        cache_totals(&svc, receipt.id).await;
        drop(
            svc.execute(SavePlacement {
                placement_id: Some(created.id),
                ..cmd(receipt.id, 500, None, None)
            })
            .await
            .unwrap(),
        );
        assert_eq!(cached_totals(&svc, receipt.id).await, [None, None]);
    }

    #[tokio::test]
    async fn rejects_single_extra_without_writes() {
        let svc = service();
        let receipt = svc.database().seed_receipt();
        cache_totals(&svc, receipt.id).await;

        for cmd in [
            cmd(receipt.id, 500, Some(10), None),
            cmd(receipt.id, 500, None, Some(20)),
        ] {
            let err = svc.execute(cmd).await.unwrap_err();

            assert!(
                matches!(err.as_ref(), ExecutionError::Validation(_)),
                "unexpected error: {err}",
            );
        }

        assert_eq!(svc.database().state().placement_writes, 0);
        assert_eq!(
            cached_totals(&svc, receipt.id).await,
            [Some("stale".to_owned()), Some("stale".to_owned())],
        );
    }

    #[tokio::test]
    async fn saves_despite_audit_failure() {
        let svc = service();
        let receipt = svc.database().seed_receipt();
        let created = svc
            .execute(cmd(receipt.id, 500, Some(1), Some(1)))
            .await
            .unwrap()
            .placement;
        svc.database().state().fail_audit = true;

        let saved = svc
            .execute(SavePlacement {
                placement_id: Some(created.id),
                ..cmd(receipt.id, 700, Some(2), Some(3))
            })
            .await
            .unwrap();

        assert_eq!(saved.changes.len(), 3);
        let state = svc.database().state();
        assert!(state.change_records.is_empty());
        assert_eq!(
            state.placements[&created.id].rate,
            Rate::new(700).unwrap(),
        );
    }

    #[tokio::test]
    async fn rejects_unknown_receipt_and_placement() {
        let svc = service();
        let receipt = svc.database().seed_receipt();
        let other = svc.database().seed_receipt();
        let created = svc
            .execute(cmd(other.id, 500, None, None))
            .await
            .unwrap()
            .placement;

        let err = svc
            .execute(cmd(receipt::Id::new(), 500, None, None))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::ReceiptNotExists(_)));

        let err = svc
            .execute(SavePlacement {
                placement_id: Some(created.id),
                ..cmd(receipt.id, 500, None, None)
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::PlacementNotExists(id) if *id == created.id,
        ));
    }
}
