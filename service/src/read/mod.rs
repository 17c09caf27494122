//! Read entities definitions.

pub mod receipt;
