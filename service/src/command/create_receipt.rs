//! [`Command`] for creating a new [`Receipt`].

use common::{operations::Insert, DateTime};
use tracerr::Traced;

use crate::{
    domain::{receipt, user, Receipt},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Receipt`].
#[derive(Clone, Debug)]
pub struct CreateReceipt {
    /// [`receipt::ClientName`] of a new [`Receipt`].
    pub client_name: receipt::ClientName,

    /// [`receipt::Phone`] of a new [`Receipt`].
    pub phone: receipt::Phone,

    /// [`receipt::Address`] of a new [`Receipt`].
    pub address: Option<receipt::Address>,

    /// [`receipt::BankName`] of a new [`Receipt`].
    pub bank_name: Option<receipt::BankName>,

    /// [`receipt::Branch`] of a new [`Receipt`].
    pub branch: Option<receipt::Branch>,

    /// [`receipt::PaymentMode`] of a new [`Receipt`].
    pub payment_mode: receipt::PaymentMode,

    /// [`receipt::Caption`] of a new [`Receipt`].
    pub caption: Option<receipt::Caption>,

    /// ID of the employee issuing a new [`Receipt`].
    pub created_by: user::Id,
}

impl<Db, Ch> Command<CreateReceipt> for Service<Db, Ch>
where
    Db: Database<Insert<Receipt>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Receipt;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateReceipt) -> Result<Self::Ok, Self::Err> {
        let CreateReceipt {
            client_name,
            phone,
            address,
            bank_name,
            branch,
            payment_mode,
            caption,
            created_by,
        } = cmd;

        let now = DateTime::now();
        let receipt = Receipt {
            id: receipt::Id::new(),
            created_by,
            message_sent: None,
            client_name,
            phone,
            address,
            bank_name,
            branch,
            payment_mode,
            caption,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        self.database()
            .execute(Insert(receipt.clone()))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(receipt)
    }
}

/// Error of [`CreateReceipt`] [`Command`] execution.
pub type ExecutionError = database::Error;
