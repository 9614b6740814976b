//! Drawing surfaces, rating/badge overlays and the board renderer.

pub mod board;
pub mod cpu;
pub mod overlay;
pub mod surface;
