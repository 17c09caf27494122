//! [`ChangeRecord`] definitions.

use std::fmt;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Receipt;
use crate::domain::{
    placement::{self, Snapshot},
    receipt, user, Placement,
};

/// Immutable audit entry describing a change of a single tracked [`Field`] of
/// a [`Placement`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChangeRecord {
    /// ID of this [`ChangeRecord`].
    pub id: Id,

    /// ID of the [`Receipt`] the changed [`Placement`] belongs to.
    pub receipt_id: receipt::Id,

    /// ID of the changed [`Placement`].
    pub placement_id: placement::Id,

    /// Display name of the changed [`Placement`].
    pub subject: placement::PaperName,

    /// Changed [`Field`].
    pub field: Field,

    /// Human-readable [`Message`] describing the change.
    pub message: Message,

    /// ID of the employee who made the change.
    pub user_id: user::Id,

    /// [`DateTime`] when this [`ChangeRecord`] was created.
    pub created_at: CreationDateTime,
}

impl ChangeRecord {
    /// Creates a new [`ChangeRecord`] of the provided [`Change`] made to the
    /// provided [`Placement`] by the provided user.
    #[must_use]
    pub fn new(
        placement: &Placement,
        change: Change,
        user_id: user::Id,
    ) -> Self {
        let Change { field, message } = change;
        Self {
            id: Id::new(),
            receipt_id: placement.receipt_id,
            placement_id: placement.id,
            subject: placement.paper.clone(),
            field,
            message,
            user_id,
            created_at: CreationDateTime::now(),
        }
    }
}

/// ID of a [`ChangeRecord`].
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

define_kind! {
    #[doc = "Tracked field of a [`Placement`]."]
    enum Field {
        #[doc = "[`placement::Rate`]."]
        Rate = 1,

        #[doc = "[`placement::ExtraUnits`]."]
        ExtraUnits = 2,

        #[doc = "[`placement::ExtraUnitCost`]."]
        ExtraUnitCost = 3,
    }
}

impl Field {
    /// Returns the human-readable label of this [`Field`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rate => "rate",
            Self::ExtraUnits => "Extra lines or words",
            Self::ExtraUnitCost => "Cost of Extra lines or words",
        }
    }
}

/// Human-readable message of a [`ChangeRecord`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Message(String);

impl Message {
    /// Describes a change of the provided [`Field`] from the `previous` value
    /// to the `current` one.
    ///
    /// An absent value is rendered as `None`.
    #[must_use]
    pub fn describe<T: fmt::Display>(
        field: Field,
        previous: Option<T>,
        current: Option<T>,
    ) -> Self {
        let label = field.label();
        let previous = Self::render(previous);
        let current = Self::render(current);
        Self(format!(
            "Previous {label}: {previous} | Current {label}: {current}",
        ))
    }

    /// Renders the provided optional value.
    fn render<T: fmt::Display>(value: Option<T>) -> String {
        value.map_or_else(|| "None".to_owned(), |v| v.to_string())
    }
}

/// Change of a single tracked [`Field`], not yet attributed to anybody.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Change {
    /// Changed [`Field`].
    pub field: Field,

    /// [`Message`] describing the change.
    pub message: Message,
}

/// Compares the `previous` [`Snapshot`] of a [`Placement`] with its `current`
/// one.
///
/// Returns a [`Change`] per changed [`Field`], always in the order of
/// [`Field::Rate`], [`Field::ExtraUnits`], [`Field::ExtraUnitCost`].
#[must_use]
pub fn compare(previous: &Snapshot, current: &Snapshot) -> Vec<Change> {
    fn diff<T: Eq + fmt::Display>(
        field: Field,
        previous: Option<T>,
        current: Option<T>,
    ) -> Option<Change> {
        (previous != current).then(|| Change {
            field,
            message: Message::describe(field, previous, current),
        })
    }

    [
        diff(Field::Rate, Some(previous.rate), Some(current.rate)),
        diff(
            Field::ExtraUnits,
            previous.extra_units,
            current.extra_units,
        ),
        diff(
            Field::ExtraUnitCost,
            previous.extra_unit_cost,
            current.extra_unit_cost,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// [`DateTime`] when a [`ChangeRecord`] was created.
pub type CreationDateTime = DateTimeOf<(ChangeRecord, unit::Creation)>;
