//! [`Command`] for updating a [`Receipt`].

use std::fmt;

use common::{
    operations::{By, Commit, Delete, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{receipt, Receipt},
    infra::{cache, database, Cache, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating the editable details of a [`Receipt`].
///
/// Client details are not editable once the [`Receipt`] is issued.
#[derive(Clone, Debug)]
pub struct UpdateReceipt {
    /// ID of the [`Receipt`] to update.
    pub receipt_id: receipt::Id,

    /// New [`receipt::BankName`] of the [`Receipt`].
    pub bank_name: Option<receipt::BankName>,

    /// New [`receipt::Branch`] of the [`Receipt`].
    pub branch: Option<receipt::Branch>,

    /// New [`receipt::PaymentMode`] of the [`Receipt`].
    pub payment_mode: receipt::PaymentMode,

    /// New [`receipt::Caption`] of the [`Receipt`].
    pub caption: Option<receipt::Caption>,
}

impl<Db, Ch> Command<UpdateReceipt> for Service<Db, Ch>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Receipt>, receipt::Id>>,
            Ok = Option<Receipt>,
            Err = Traced<database::Error>,
        > + Database<Update<Receipt>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
    Ch: Cache<Delete<cache::Key>, Ok = (), Err: fmt::Display>,
{
    type Ok = Receipt;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateReceipt) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateReceipt {
            receipt_id,
            bank_name,
            branch,
            payment_mode,
            caption,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut receipt = tx
            .execute(Select(By::<Option<Receipt>, _>::new(receipt_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReceiptNotExists(receipt_id))
            .map_err(tracerr::wrap!())?;

        receipt.bank_name = bank_name;
        receipt.branch = branch;
        receipt.payment_mode = payment_mode;
        receipt.caption = caption;
        receipt.updated_at = DateTime::now().coerce();

        tx.execute(Update(receipt.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.invalidate_totals(receipt_id).await;

        Ok(receipt)
    }
}

/// Error of [`UpdateReceipt`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Receipt`] doesn't exist.
    #[display("`Receipt(id: {_0})` does not exist")]
    #[from(ignore)]
    ReceiptNotExists(#[error(not(source))] receipt::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{By, Insert, Select};

    use crate::{
        domain::receipt,
        infra::{cache, database::fake::InMemory, Cache as _},
        Command as _, Config, Service,
    };

    use super::{ExecutionError, UpdateReceipt};

    #[tokio::test]
    async fn updates_receipt_and_invalidates_totals() {
        let svc = Service::new(
            Config::default(),
            InMemory::default(),
            cache::Memory::default(),
        );
        let receipt = svc.database().seed_receipt();
        let key = cache::Key::total_amount(receipt.id);
        svc.cache()
            .execute(Insert(cache::Entry {
                key: key.clone(),
                value: "736".to_owned(),
                ttl: Duration::from_secs(60),
            }))
            .await
            .unwrap();

        let updated = svc
            .execute(UpdateReceipt {
                receipt_id: receipt.id,
                bank_name: receipt::BankName::new("State Bank of India"),
                branch: receipt::Branch::new("Jaipur Main"),
                payment_mode: receipt::PaymentMode::Cheque,
                caption: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.payment_mode, receipt::PaymentMode::Cheque);
        assert_eq!(updated.client_name, receipt.client_name);
        assert_eq!(
            svc.database().state().receipts[&receipt.id].bank_name,
            receipt::BankName::new("State Bank of India"),
        );
        assert_eq!(svc.cache().execute(Select(By::new(key))).await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_unknown_receipt() {
        let svc = Service::new(
            Config::default(),
            InMemory::default(),
            cache::Memory::default(),
        );

        let err = svc
            .execute(UpdateReceipt {
                receipt_id: receipt::Id::new(),
                bank_name: None,
                branch: None,
                payment_mode: receipt::PaymentMode::Cash,
                caption: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::ReceiptNotExists(_)));
    }
}
