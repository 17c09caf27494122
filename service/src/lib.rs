//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
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

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::time::Duration;

use common::Percent;
use rust_decimal::Decimal;
use smart_default::SmartDefault;

#[cfg(doc)]
use domain::{placement::Charge, Receipt};
#[cfg(doc)]
use infra::{Cache, Database};

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// GST rate applied to the cost of extra lines or words when calculating
    /// a [`Charge`].
    #[default(Percent::new(Decimal::from(18)).expect("valid `Percent`"))]
    pub gst_rate: Percent,

    /// Period the totals of a [`Receipt`] stay in the [`Cache`] for.
    #[default(Duration::from_secs(60 * 24 * 365))]
    pub totals_ttl: Duration,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Ch> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Cache`] of this [`Service`].
    cache: Ch,
}

impl<Db, Ch> Service<Db, Ch> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db, cache: Ch) -> Self {
        Self {
            config,
            database,
            cache,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Cache`] of this [`Service`].
    #[must_use]
    pub fn cache(&self) -> &Ch {
        &self.cache
    }
}
