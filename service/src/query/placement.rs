//! [`Query`] collection related to [`Placement`]s.

use common::operations::By;

use crate::domain::{placement, receipt, Placement, PublicationDate};
#[cfg(doc)]
use crate::{domain::Receipt, Query};

use super::DatabaseQuery;

/// Queries a [`Placement`] by its [`placement::Id`].
pub type ById = DatabaseQuery<By<Option<Placement>, placement::Id>>;

/// Queries all the [`Placement`]s of a [`Receipt`], in the order of their
/// creation.
pub type ByReceipt = DatabaseQuery<By<Vec<Placement>, receipt::Id>>;

/// Queries all the [`PublicationDate`]s of a [`Placement`], in ascending
/// order.
pub type PublicationDates =
    DatabaseQuery<By<Vec<PublicationDate>, placement::Id>>;
