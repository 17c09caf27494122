//! [`Command`] for adding a [`PublicationDate`] to a [`Placement`].

use common::{
    operations::{By, Insert, Select},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        placement,
        publication::{self, PublicationDate},
        Placement,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for adding a [`PublicationDate`] to a [`Placement`].
#[derive(Clone, Copy, Debug)]
pub struct AddPublicationDate {
    /// ID of the published [`Placement`].
    pub placement_id: placement::Id,

    /// [`Date`] of the publication.
    pub date: Option<Date>,
}

impl<Db, Ch> Command<AddPublicationDate> for Service<Db, Ch>
where
    Db: Database<
            Select<By<Option<Placement>, placement::Id>>,
            Ok = Option<Placement>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<PublicationDate>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = PublicationDate;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AddPublicationDate,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddPublicationDate { placement_id, date } = cmd;

        let publication = PublicationDate::new(placement_id, date)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.database()
            .execute(Select(By::<Option<Placement>, _>::new(placement_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PlacementNotExists(placement_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.database()
            .execute(Insert(publication))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(publication)
    }
}

/// Error of [`AddPublicationDate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Date`] is not provided.
    #[display("{_0}")]
    DateMissing(publication::DateMissingError),

    /// [`Placement`] doesn't exist.
    #[display("`Placement(id: {_0})` does not exist")]
    #[from(ignore)]
    PlacementNotExists(#[error(not(source))] placement::Id),
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::{
        command::SavePlacement,
        domain::{placement, user},
        infra::{cache, database::fake::InMemory},
        Command as _, Config, Service,
    };

    use super::{AddPublicationDate, ExecutionError};

    #[tokio::test]
    async fn adds_date() {
        let svc = Service::new(
            Config::default(),
            InMemory::default(),
            cache::Memory::default(),
        );
        let receipt = svc.database().seed_receipt();
        let placement = svc
            .execute(SavePlacement {
                placement_id: None,
                receipt_id: receipt.id,
                paper: placement::PaperName::new("Rajasthan Patrika").unwrap(),
                caption: placement::Caption::new("Tender").unwrap(),
                edition: placement::Edition::new("Udaipur").unwrap(),
                rate: placement::Rate::new(1200).unwrap(),
                extra_units: None,
                extra_unit_cost: None,
                acting_user: user::Id::new(),
            })
            .await
            .unwrap()
            .placement;
        let date = Date::from_calendar_date(2024, 5, 1).unwrap();

        let added = svc
            .execute(AddPublicationDate {
                placement_id: placement.id,
                date: Some(date),
            })
            .await
            .unwrap();

        assert_eq!(added.date, date);
        assert_eq!(svc.database().state().publication_dates, [added]);
    }

    #[tokio::test]
    async fn rejects_missing_date() {
        let svc = Service::new(
            Config::default(),
            InMemory::default(),
            cache::Memory::default(),
        );

        let err = svc
            .execute(AddPublicationDate {
                placement_id: placement::Id::new(),
                date: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::DateMissing(_)));
        assert_eq!(err.as_ref().to_string(), "Please Enter the date.");
        assert!(svc.database().state().publication_dates.is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_placement() {
        let svc = Service::new(
            Config::default(),
            InMemory::default(),
            cache::Memory::default(),
        );

        let err = svc
            .execute(AddPublicationDate {
                placement_id: placement::Id::new(),
                date: Some(Date::from_calendar_date(2024, 5, 1).unwrap()),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PlacementNotExists(_),
        ));
    }
}
