//! Greedy word wrap and single-line shaping.

pub mod shaper;
pub mod wrap;
