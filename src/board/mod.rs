//! Board catalog and prompt-cell input model.

pub(crate) mod catalog;
pub mod model;
pub mod registry;
