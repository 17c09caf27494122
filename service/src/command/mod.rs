//! [`Command`] definition.

pub mod add_publication_date;
pub mod create_receipt;
pub mod save_placement;
pub mod update_receipt;

use std::fmt;

use common::operations::Delete;
use tracing as log;

#[cfg(doc)]
use crate::domain::Receipt;
use crate::{
    domain::receipt,
    infra::{cache, Cache},
    Service,
};

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_publication_date::AddPublicationDate, create_receipt::CreateReceipt,
    save_placement::SavePlacement, update_receipt::UpdateReceipt,
};

impl<Db, Ch> Service<Db, Ch> {
    /// Invalidates the cached totals of the provided [`Receipt`].
    ///
    /// Failures are logged and never propagated.
    async fn invalidate_totals(&self, receipt_id: receipt::Id)
    where
        Ch: Cache<Delete<cache::Key>, Ok = (), Err: fmt::Display>,
    {
        for key in cache::Key::totals(receipt_id) {
            if let Err(e) = self.cache().execute(Delete(key.clone())).await {
                log::error!("failed to invalidate `{key}` cache entry: {e}");
            }
        }
    }
}
