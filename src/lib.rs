#![forbid(unsafe_code)]
#![deny(missing_docs)]
//! Personalized reading and gaming bingo boards rendered as PNG images.
//!
//! A board is a fixed 5x5 grid drawn over a per-family background template. Filled cells get
//! their cover art, a rating drawn as repeated icons, an optional hard-mode badge and an optional
//! title; some families also print prompt labels and a footer listing extra entries.

pub mod assets;
pub mod board;
pub mod cache;
pub mod cover;
mod foundation;
pub mod render;
pub mod text;

pub use assets::decode::{RasterImage, decode_image, encode_png_premul, normalize_to_png};
pub use assets::loader::{AssetLoader, normalize_rel_path};
pub use board::model::{
    EXTRA_CELLS, GRID_CELLS, MAX_CELLS, MAX_RATING, PromptCell, display_title, parse_cells,
    validate_cells,
};
pub use board::registry::{
    BadgeGeometry, BoardConfig, BoardConfigRegistry, BoardFamily, BoardId, ExtraEntriesGeometry,
    ExtraVariant, FeatureFlags, GridGeometry, LabelGeometry, StarGeometry, StarLayout,
    TitleGeometry, resolve,
};
pub use cache::response::{ResponseCache, search_cache_key};
pub use cover::fetch::{CoverError, CoverFetcher, HttpCoverFetcher, normalize_cover_url};
pub use cover::pipeline::CoverPipeline;
pub use foundation::core::{Canvas, Point, Rect, Size, TextAlign, Vec2};
pub use foundation::error::{BoardError, BoardResult};
pub use render::board::{BoardRenderer, RendererOpts};
pub use render::cpu::CpuSurface;
pub use render::overlay::{RatingIcons, draw_badge, draw_rating};
pub use render::surface::{DrawOp, DrawSurface, RecordingSurface};
pub use text::shaper::{TextBrushRgba8, TextShaper};
pub use text::wrap::{wrap_draw, wrap_lines};
