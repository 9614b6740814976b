//! Remote cover retrieval and normalization.

pub mod fetch;
pub mod pipeline;
