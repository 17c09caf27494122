//! Application provides command line interface for interacting with the
//! [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod args;
pub mod config;
pub mod error;
pub mod render;

use service::{
    command::{self, Command as _},
    infra::Postgres,
    query::{self, Query as _},
};
// Used in binary.
use refinery as _;
use tokio as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// Derived totals are cached in the same [`Postgres`] database, so they
/// outlive a single run.
///
/// [`Service`]: service::Service
pub type Service = service::Service<Postgres, Postgres>;

/// Executes the provided [`args::Command`] on the [`Service`], returning its
/// rendered result.
///
/// # Errors
///
/// If the [`args::Command`] execution fails.
pub async fn execute(
    service: &Service,
    cmd: args::Command,
) -> Result<String, Error> {
    use args::Command as C;

    Ok(match cmd {
        C::CreateReceipt(args) => render::receipt(
            &service
                .execute(command::CreateReceipt::from(args))
                .await
                .map_err(AsError::into_error)?,
        ),
        C::UpdateReceipt(args) => render::receipt(
            &service
                .execute(command::UpdateReceipt::from(args))
                .await
                .map_err(AsError::into_error)?,
        ),
        C::SavePlacement(args) => render::saved(
            &service
                .execute(command::SavePlacement::from(args))
                .await
                .map_err(AsError::into_error)?,
        ),
        C::AddDate(args) => render::publication_date(
            &service
                .execute(command::AddPublicationDate::from(args))
                .await
                .map_err(AsError::into_error)?,
        ),
        C::Total { receipt } => render::total(
            &service
                .execute(query::ReceiptTotal(receipt))
                .await
                .map_err(AsError::into_error)?,
        ),
        C::Preview { receipt } => render::preview(
            &service
                .execute(query::ReceiptPreview(receipt))
                .await
                .map_err(AsError::into_error)?,
        ),
        C::History { placement } => render::history(
            &service
                .execute(query::change_records::ByPlacement::by(placement))
                .await
                .map_err(AsError::into_error)?,
        ),
    })
}

#[cfg(test)]
mod spec {
    use service::infra::Postgres;

    use super::Service;

    #[test]
    fn caches_totals_in_database() {
        let _: fn(&Service) -> &Postgres = Service::cache;
    }
}
