//! In-memory [`Database`] used in tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use common::{
    operations::{By, Commit, Insert, Select, Transact, Update},
    DateTime,
};
use tracerr::Traced;

use crate::{
    domain::{
        placement, receipt, user, ChangeRecord, Placement, PublicationDate,
        Receipt,
    },
    infra::{audit, database, AuditLog, Database},
    read,
};

/// In-memory [`Database`] sharing its [`State`] between clones.
#[derive(Clone, Debug, Default)]
pub struct InMemory(Arc<Mutex<State>>);

/// Stored state of an [`InMemory`] database.
#[derive(Debug, Default)]
pub struct State {
    /// Stored [`Receipt`]s.
    pub receipts: HashMap<receipt::Id, Receipt>,

    /// Stored [`Placement`]s.
    pub placements: HashMap<placement::Id, Placement>,

    /// Stored [`PublicationDate`]s.
    pub publication_dates: Vec<PublicationDate>,

    /// Appended [`ChangeRecord`]s.
    pub change_records: Vec<ChangeRecord>,

    /// Number of [`Placement`] writes performed.
    pub placement_writes: usize,

    /// Indicator whether appending [`ChangeRecord`]s fails with a conflict.
    pub fail_audit: bool,
}

impl InMemory {
    /// Locks the [`State`] of this [`InMemory`] database.
    pub fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap()
    }

    /// Stores a new [`Receipt`] and returns it.
    pub fn seed_receipt(&self) -> Receipt {
        let now = DateTime::now();
        let receipt = Receipt {
            id: receipt::Id::new(),
            created_by: user::Id::new(),
            message_sent: None,
            client_name: receipt::ClientName::new("Sharma Traders").unwrap(),
            phone: receipt::Phone::new("+919876543210").unwrap(),
            address: None,
            bank_name: None,
            branch: None,
            payment_mode: receipt::PaymentMode::Cash,
            caption: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        drop(self.state().receipts.insert(receipt.id, receipt.clone()));
        receipt
    }
}

impl Database<Transact> for InMemory {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Select<By<Option<Receipt>, receipt::Id>>> for InMemory {
    type Ok = Option<Receipt>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Receipt>, receipt::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().receipts.get(&by.into_inner()).cloned())
    }
}

impl Database<Insert<Receipt>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(receipt): Insert<Receipt>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.state().receipts.insert(receipt.id, receipt));
        Ok(())
    }
}

impl Database<Update<Receipt>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(receipt): Update<Receipt>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Insert(receipt)).await
    }
}

impl Database<Select<By<Option<Placement>, placement::Id>>> for InMemory {
    type Ok = Option<Placement>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Placement>, placement::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().placements.get(&by.into_inner()).cloned())
    }
}

impl Database<Select<By<Vec<Placement>, receipt::Id>>> for InMemory {
    type Ok = Vec<Placement>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Placement>, receipt::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let receipt_id = by.into_inner();
        let mut placements = self
            .state()
            .placements
            .values()
            .filter(|p| p.receipt_id == receipt_id)
            .cloned()
            .collect::<Vec<_>>();
        placements.sort_by_key(|p| p.created_at);
        Ok(placements)
    }
}

impl Database<Insert<Placement>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(placement): Insert<Placement>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        state.placement_writes += 1;
        drop(state.placements.insert(placement.id, placement));
        Ok(())
    }
}

impl Database<Update<Placement>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(placement): Update<Placement>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Insert(placement)).await
    }
}

impl Database<Insert<PublicationDate>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(date): Insert<PublicationDate>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().publication_dates.push(date);
        Ok(())
    }
}

impl Database<Select<By<Vec<PublicationDate>, placement::Id>>> for InMemory {
    type Ok = Vec<PublicationDate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<PublicationDate>, placement::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let placement_id = by.into_inner();
        let mut dates = self
            .state()
            .publication_dates
            .iter()
            .filter(|d| d.placement_id == placement_id)
            .copied()
            .collect::<Vec<_>>();
        dates.sort_by_key(|d| d.date);
        Ok(dates)
    }
}

impl AuditLog<Insert<ChangeRecord>> for InMemory {
    type Ok = ();
    type Err = Traced<audit::Error>;

    async fn execute(
        &self,
        Insert(record): Insert<ChangeRecord>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        if state.fail_audit {
            return Err(tracerr::new!(audit::Error::Conflict(
                database::Error::Fake
            )));
        }
        state.change_records.push(record);
        Ok(())
    }
}

impl Database<Select<By<Vec<ChangeRecord>, placement::Id>>> for InMemory {
    type Ok = Vec<ChangeRecord>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<ChangeRecord>, placement::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let placement_id = by.into_inner();
        Ok(self
            .state()
            .change_records
            .iter()
            .filter(|r| r.placement_id == placement_id)
            .cloned()
            .collect())
    }
}

impl Database<Select<By<read::receipt::TotalAmount, receipt::Id>>>
    for InMemory
{
    type Ok = read::receipt::TotalAmount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::receipt::TotalAmount, receipt::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let receipt_id = by.into_inner();
        Ok(read::receipt::TotalAmount(
            self.state()
                .placements
                .values()
                .filter(|p| p.receipt_id == receipt_id)
                .map(|p| p.charge.amount)
                .sum(),
        ))
    }
}
