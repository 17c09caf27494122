//! Domain definitions.

pub mod change_record;
pub mod placement;
pub mod publication;
pub mod receipt;
pub mod user;

pub use self::{
    change_record::ChangeRecord, placement::Placement,
    publication::PublicationDate, receipt::Receipt,
};
