//! [`PublicationDate`] definitions.

use common::Date;
use derive_more::{Display, Error, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::placement;
#[cfg(doc)]
use crate::domain::Placement;

/// [`Date`] an advertisement of a [`Placement`] is published on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicationDate {
    /// ID of this [`PublicationDate`].
    pub id: Id,

    /// ID of the [`Placement`] being published.
    pub placement_id: placement::Id,

    /// [`Date`] of the publication.
    pub date: Date,
}

impl PublicationDate {
    /// Creates a new [`PublicationDate`] of the provided [`Placement`].
    ///
    /// # Errors
    ///
    /// With a [`DateMissingError`] if no `date` is provided.
    pub fn new(
        placement_id: placement::Id,
        date: Option<Date>,
    ) -> Result<Self, DateMissingError> {
        Ok(Self {
            id: Id::new(),
            placement_id,
            date: date.ok_or(DateMissingError)?,
        })
    }
}

/// ID of a [`PublicationDate`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Error of a [`PublicationDate`] being saved without a [`Date`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("Please Enter the date.")]
pub struct DateMissingError;

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::domain::placement;

    use super::{DateMissingError, PublicationDate};

    #[test]
    fn requires_date() {
        let placement_id = placement::Id::new();
        let date = Date::from_calendar_date(2024, 3, 15).unwrap();

        let publication =
            PublicationDate::new(placement_id, Some(date)).unwrap();
        assert_eq!(publication.placement_id, placement_id);
        assert_eq!(publication.date, date);

        assert_eq!(
            PublicationDate::new(placement_id, None).unwrap_err(),
            DateMissingError,
        );
        assert_eq!(DateMissingError.to_string(), "Please Enter the date.");
    }
}
