//! Image decoding and the memoized template/icon/font loader.

pub mod decode;
pub mod loader;
