//! Plain text rendering of [`Service`] results.
//!
//! [`Service`]: crate::Service

use std::fmt::{self, Write as _};

use itertools::Itertools as _;
use service::{
    domain::{
        placement::save::Saved, ChangeRecord, Placement, PublicationDate,
        Receipt,
    },
    read::receipt::{Preview, Total},
};

/// Renders the provided [`Receipt`].
#[must_use]
pub fn receipt(receipt: &Receipt) -> String {
    let Receipt {
        id,
        created_by: _,
        message_sent: _,
        client_name,
        phone,
        address,
        bank_name,
        branch,
        payment_mode,
        caption,
        created_at,
        updated_at: _,
    } = receipt;

    let mut out = String::new();
    line(&mut out, "Receipt", id);
    line(&mut out, "Client", client_name);
    line(&mut out, "Phone", phone);
    optional(&mut out, "Address", address.as_ref());
    optional(&mut out, "Bank", bank_name.as_ref());
    optional(&mut out, "Branch", branch.as_ref());
    line(&mut out, "Payment mode", payment_mode);
    optional(&mut out, "Caption", caption.as_ref());
    line(&mut out, "Created at", created_at);
    out
}

/// Renders the outcome of saving a [`Placement`].
#[must_use]
pub fn saved(saved: &Saved) -> String {
    let mut out = placement(&saved.placement);
    line(&mut out, "Changes", saved.changes.len());
    out
}

/// Renders the provided [`Placement`].
#[must_use]
pub fn placement(placement: &Placement) -> String {
    let mut out = String::new();
    line(&mut out, "Placement", placement.id);
    line(&mut out, "Receipt", placement.receipt_id);
    line(&mut out, "Paper", &placement.paper);
    line(&mut out, "Caption", &placement.caption);
    line(&mut out, "Edition", &placement.edition);
    line(&mut out, "Rate", placement.rate);
    optional(&mut out, "Extra lines or words", placement.extra_units());
    optional(
        &mut out,
        "Cost of extra lines or words",
        placement.extra_unit_cost(),
    );
    line(&mut out, "Amount charged", placement.charge.amount);
    line(&mut out, "In words", &placement.charge.in_words);
    out
}

/// Renders the provided [`PublicationDate`].
#[must_use]
pub fn publication_date(date: &PublicationDate) -> String {
    let mut out = String::new();
    line(&mut out, "Placement", date.placement_id);
    line(&mut out, "Published on", date.date);
    out
}

/// Renders the provided [`Total`].
#[must_use]
pub fn total(total: &Total) -> String {
    let mut out = String::new();
    line(&mut out, "Total amount", total.amount);
    line(&mut out, "In words", &total.in_words);
    out
}

/// Renders the provided [`Preview`].
#[must_use]
pub fn preview(preview: &Preview) -> String {
    let mut out = receipt(&preview.receipt);
    for l in &preview.lines {
        let p = &l.placement;
        _ = writeln!(
            out,
            "\n{} | {} | {} | {} | {}",
            p.paper,
            p.edition,
            p.caption,
            l.dates.iter().join(", "),
            p.charge.amount,
        );
    }
    out.push('\n');
    out.push_str(&total(&preview.total));
    out
}

/// Renders the provided [`ChangeRecord`]s.
#[must_use]
pub fn history(records: &[ChangeRecord]) -> String {
    if records.is_empty() {
        return "No changes\n".to_owned();
    }
    records
        .iter()
        .map(|r| {
            format!(
                "{} [{}] {}: {} (by {})\n",
                r.created_at, r.subject, r.field, r.message, r.user_id,
            )
        })
        .collect()
}

/// Writes a single `label: value` line.
fn line(out: &mut String, label: &str, value: impl fmt::Display) {
    _ = writeln!(out, "{label}: {value}");
}

/// Writes a single `label: value` line, if the `value` is present.
fn optional(out: &mut String, label: &str, value: Option<impl fmt::Display>) {
    if let Some(value) = value {
        line(out, label, value);
    }
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};
    use service::domain::{
        change_record::{self, Field, Message},
        placement, receipt, user, ChangeRecord,
    };

    use super::history;

    #[test]
    fn renders_empty_history() {
        assert_eq!(history(&[]), "No changes\n");
    }

    #[test]
    fn renders_history_entries() {
        let record = ChangeRecord {
            id: change_record::Id::new(),
            receipt_id: receipt::Id::new(),
            placement_id: placement::Id::new(),
            subject: placement::PaperName::new("Dainik Bhaskar").unwrap(),
            field: Field::Rate,
            message: Message::describe(
                Field::Rate,
                Some(Money::from(500)),
                Some(Money::from(600)),
            ),
            user_id: user::Id::new(),
            created_at: DateTime::now().coerce(),
        };

        let out = history(&[record]);

        assert!(out.contains(
            "[Dainik Bhaskar] RATE: Previous rate: 500 | Current rate: 600",
        ));
    }
}
