//! Infrastructure layer.

pub mod audit;
pub mod cache;
pub mod database;

pub use self::{audit::AuditLog, cache::Cache, database::Database};
#[cfg(feature = "postgres")]
pub use self::database::{postgres, Postgres};
