//! Saving pipeline of a [`Placement`].
//!
//! Saving a [`Placement`] validates its [`Draft`] first, then derives its
//! [`Charge`], and finally compares the tracked fields against the
//! previously persisted state, producing a [`ChangeRecord`] per change.

use common::{DateTime, Percent};

use crate::domain::{change_record, user, ChangeRecord};

use super::{Charge, Draft, Placement, ValidationError};

/// Result of processing a [`Placement`] save.
#[derive(Clone, Debug)]
pub struct Saved {
    /// [`Placement`] to be persisted.
    pub placement: Placement,

    /// [`ChangeRecord`]s describing the changes made to the [`Placement`].
    ///
    /// Always empty for a newly created [`Placement`].
    pub changes: Vec<ChangeRecord>,
}

/// Processes a save of the provided [`Draft`] over the `previous` state of
/// the [`Placement`] made by the provided user.
///
/// `previous` is [`None`] when the [`Placement`] is being created.
///
/// # Errors
///
/// With a [`ValidationError`] if the [`Draft`] is invalid.
pub fn process(
    previous: Option<&Placement>,
    draft: Draft,
    acting_user: user::Id,
    gst: Percent,
) -> Result<Saved, ValidationError> {
    let extra = draft.extra()?;
    let charge = Charge::calculate(draft.rate, extra, gst);

    let Draft {
        id,
        receipt_id,
        paper,
        caption,
        edition,
        rate,
        ..
    } = draft;
    let now = DateTime::now();
    let placement = Placement {
        id,
        receipt_id,
        paper,
        caption,
        edition,
        rate,
        extra,
        charge,
        created_at: previous.map_or_else(|| now.coerce(), |p| p.created_at),
        updated_at: now.coerce(),
    };

    let changes = previous
        .map(|p| {
            change_record::compare(&p.snapshot(), &placement.snapshot())
                .into_iter()
                .map(|c| ChangeRecord::new(&placement, c, acting_user))
                .collect()
        })
        .unwrap_or_default();

    Ok(Saved { placement, changes })
}
