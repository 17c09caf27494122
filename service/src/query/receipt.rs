//! [`Query`] collection related to a single [`Receipt`].

use common::operations::By;

use crate::domain::{receipt, Receipt};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Receipt`] by its [`receipt::Id`].
pub type ById = DatabaseQuery<By<Option<Receipt>, receipt::Id>>;
