//! [`Query`] of a printable [`Preview`] of a [`Receipt`].

use std::fmt;

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{placement, receipt, Placement, PublicationDate, Receipt},
    infra::{cache, database, Cache, Database},
    read::receipt::{Line, Preview, TotalAmount},
    Service,
};

use super::{Query, ReceiptTotal};

/// [`Query`] of a printable [`Preview`] of a [`Receipt`].
///
/// Every [`Placement`] of the [`Receipt`] must have at least one
/// [`PublicationDate`].
#[derive(Clone, Copy, Debug)]
pub struct ReceiptPreview(pub receipt::Id);

impl<Db, Ch> Query<ReceiptPreview> for Service<Db, Ch>
where
    Db: Database<
            Select<By<Option<Receipt>, receipt::Id>>,
            Ok = Option<Receipt>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Placement>, receipt::Id>>,
            Ok = Vec<Placement>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<PublicationDate>, placement::Id>>,
            Ok = Vec<PublicationDate>,
            Err = Traced<database::Error>,
        > + Database<
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
    type Ok = Preview;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ReceiptPreview(receipt_id): ReceiptPreview,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let receipt = self
            .database()
            .execute(Select(By::<Option<Receipt>, _>::new(receipt_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReceiptNotExists(receipt_id))
            .map_err(tracerr::wrap!())?;

        let placements = self
            .database()
            .execute(Select(By::<Vec<Placement>, _>::new(receipt_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if placements.is_empty() {
            return Err(tracerr::new!(E::NoPlacements(receipt.client_name)));
        }

        let mut lines = Vec::with_capacity(placements.len());
        for placement in placements {
            let dates = self
                .database()
                .execute(Select(By::<Vec<PublicationDate>, _>::new(
                    placement.id,
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if dates.is_empty() {
                return Err(tracerr::new!(E::NoPublicationDates(
                    placement.paper,
                )));
            }
            lines.push(Line {
                placement,
                dates: dates.into_iter().map(|d| d.date).collect(),
            });
        }

        let total = self
            .execute(ReceiptTotal(receipt_id))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Preview {
            receipt,
            lines,
            total,
        })
    }
}

/// Error of [`ReceiptPreview`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Receipt`] with the provided ID doesn't exist.
    #[display("`Receipt(id: {_0})` does not exist")]
    #[from(ignore)]
    ReceiptNotExists(#[error(not(source))] receipt::Id),

    /// [`Receipt`] has no [`Placement`]s to preview.
    #[display("No placements for {_0}. Please add some.")]
    #[from(ignore)]
    NoPlacements(#[error(not(source))] receipt::ClientName),

    /// [`Placement`] has no [`PublicationDate`]s.
    #[display("No publication dates for {_0}. Please add some.")]
    #[from(ignore)]
    NoPublicationDates(#[error(not(source))] placement::PaperName),
}

#[cfg(test)]
mod spec {
    use common::{Date, Money};

    use crate::{
        command::{AddPublicationDate, SavePlacement},
        domain::{placement, receipt, user, Placement},
        infra::{cache, database::fake::InMemory},
        Command as _, Config, Query as _, Service,
    };

    use super::{ExecutionError, ReceiptPreview};

    type Svc = Service<InMemory, cache::Memory>;

    fn service() -> Svc {
        Service::new(
            Config::default(),
            InMemory::default(),
            cache::Memory::default(),
        )
    }

    async fn add_placement(
        svc: &Svc,
        receipt_id: receipt::Id,
        paper: &str,
        rate: i32,
    ) -> Placement {
        svc.execute(SavePlacement {
            placement_id: None,
            receipt_id,
            paper: placement::PaperName::new(paper).unwrap(),
            caption: placement::Caption::new("Obituary").unwrap(),
            edition: placement::Edition::new("Jaipur").unwrap(),
            rate: placement::Rate::new(rate).unwrap(),
            extra_units: None,
            extra_unit_cost: None,
            acting_user: user::Id::new(),
        })
        .await
        .unwrap()
        .placement
    }

    async fn add_date(svc: &Svc, placement_id: placement::Id, day: u8) {
        let date = Date::from_calendar_date(2024, 3, day).unwrap();
        drop(
            svc.execute(AddPublicationDate {
                placement_id,
                date: Some(date),
            })
            .await
            .unwrap(),
        );
    }

    #[tokio::test]
    async fn previews_receipt() {
        let svc = service();
        let receipt = svc.database().seed_receipt();
        let first = add_placement(&svc, receipt.id, "Rajasthan Patrika", 500)
            .await;
        let second =
            add_placement(&svc, receipt.id, "Dainik Bhaskar", 250).await;
        add_date(&svc, first.id, 12).await;
        add_date(&svc, first.id, 3).await;
        add_date(&svc, second.id, 7).await;

        let preview = svc.execute(ReceiptPreview(receipt.id)).await.unwrap();

        assert_eq!(preview.receipt.id, receipt.id);
        assert_eq!(preview.lines.len(), 2);
        let line = preview
            .lines
            .iter()
            .find(|l| l.placement.id == first.id)
            .unwrap();
        assert_eq!(
            line.dates.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["2024-03-03", "2024-03-12"],
        );
        assert_eq!(preview.total.amount, Money::from(750));
        assert_eq!(
            preview.total.in_words.to_string(),
            "Seven Hundred Fifty",
        );
    }

    #[tokio::test]
    async fn fails_without_placements() {
        let svc = service();
        let receipt = svc.database().seed_receipt();

        let err = svc.execute(ReceiptPreview(receipt.id)).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NoPlacements(_)));
        assert_eq!(
            err.as_ref().to_string(),
            "No placements for Sharma Traders. Please add some.",
        );
    }

    #[tokio::test]
    async fn fails_on_placement_without_dates() {
        let svc = service();
        let receipt = svc.database().seed_receipt();
        let dated = add_placement(&svc, receipt.id, "Rajasthan Patrika", 500)
            .await;
        add_date(&svc, dated.id, 1).await;
        drop(add_placement(&svc, receipt.id, "Dainik Bhaskar", 250).await);

        let err = svc.execute(ReceiptPreview(receipt.id)).await.unwrap_err();

        assert_eq!(
            err.as_ref().to_string(),
            "No publication dates for Dainik Bhaskar. Please add some.",
        );
    }

    #[tokio::test]
    async fn fails_on_unknown_receipt() {
        let svc = service();

        let err = svc
            .execute(ReceiptPreview(receipt::Id::new()))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::ReceiptNotExists(_),
        ));
    }
}
