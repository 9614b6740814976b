//! Board ids, per-family geometry and layout resolution.

use std::{fmt, str::FromStr};

use crate::{
    board::{catalog, model::GRID_CELLS},
    foundation::core::{Canvas, Point, Rect, Size, Vec2},
    foundation::error::{BoardError, BoardResult},
};

/// Boards the renderer knows how to lay out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoardId {
    /// Fully Booked 2024: the original legacy layout.
    FullyBooked24,
    /// Fully Booked 2025: half stars, hard mode, titles and a short-story footer.
    FullyBooked25,
    /// r/Fantasy 2024: hard mode badges with printed prompt labels.
    RFantasy24,
    /// Game bingo 2025.
    GameBingo25,
    /// Movie and TV bingo 2025.
    ScreenBingo25,
}

impl BoardId {
    /// Every board in catalog order.
    pub const ALL: [BoardId; 5] = [
        BoardId::FullyBooked24,
        BoardId::FullyBooked25,
        BoardId::RFantasy24,
        BoardId::GameBingo25,
        BoardId::ScreenBingo25,
    ];

    /// Stable identifier used by callers.
    pub fn as_str(self) -> &'static str {
        match self {
            BoardId::FullyBooked24 => "fullybooked24",
            BoardId::FullyBooked25 => "fullybooked25",
            BoardId::RFantasy24 => "rfantasy24",
            BoardId::GameBingo25 => "gamebingo25",
            BoardId::ScreenBingo25 => "screenbingo25",
        }
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BoardId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| BoardError::unknown_board(s))
    }
}

/// Placement of the 5x5 cover grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    /// Top-left corner of cell (row 0, col 0).
    pub origin: Point,
    /// Horizontal distance between columns.
    pub stride_x: f64,
    /// Vertical distance between rows.
    pub stride_y: f64,
    /// Size covers are scaled to.
    pub cover: Size,
}

impl GridGeometry {
    /// Top-left corner of the cover slot at `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> Point {
        self.origin + Vec2::new(col as f64 * self.stride_x, row as f64 * self.stride_y)
    }

    /// Cover rectangle at `(row, col)`.
    pub fn cover_rect(&self, row: usize, col: usize) -> Rect {
        Rect::from_origin_size(self.cell_origin(row, col), self.cover)
    }

    /// Horizontal center of the cover slot at `(row, col)`.
    pub fn center_x(&self, row: usize, col: usize) -> f64 {
        self.cell_origin(row, col).x + self.cover.width / 2.0
    }
}

/// Orientation of rating icons, which also decides half-icon support.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarLayout {
    /// Legacy layout: icons stacked down the left margin of the cover, whole icons only.
    Stacked,
    /// Icons in a row under the cover.
    Row {
        /// Draw a left-half icon for a fractional remainder.
        half_icons: bool,
    },
}

/// Rating icon placement relative to a cell origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarGeometry {
    /// Offset of the first icon from the cell origin.
    pub offset: Vec2,
    /// Distance between consecutive icons along the layout axis.
    pub pitch: f64,
    /// Drawn icon size.
    pub icon: Size,
    /// Orientation and fractional support.
    pub layout: StarLayout,
}

impl StarGeometry {
    /// Step between consecutive icons.
    pub fn pitch_vec(&self) -> Vec2 {
        match self.layout {
            StarLayout::Stacked => Vec2::new(0.0, self.pitch),
            StarLayout::Row { .. } => Vec2::new(self.pitch, 0.0),
        }
    }

    /// Whether fractional ratings draw a half icon.
    pub fn supports_half_icons(&self) -> bool {
        matches!(self.layout, StarLayout::Row { half_icons: true })
    }
}

/// Hard-mode badge placement relative to a cell origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BadgeGeometry {
    /// Offset of the badge's top-left corner from the cell origin.
    pub offset: Vec2,
    /// Drawn badge size.
    pub size: Size,
}

/// Word-wrapped cell title placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleGeometry {
    /// Baseline offset below the cell origin.
    pub offset_y: f64,
    /// Baseline offset used for row 1 only.
    pub offset_y_row1: f64,
    /// Distance between wrapped lines.
    pub line_height: f64,
    /// Wrap width.
    pub max_width: f64,
    /// Font size in pixels.
    pub font_px: f32,
}

impl TitleGeometry {
    /// Baseline offset for titles in `row`.
    pub fn offset_for_row(&self, row: usize) -> f64 {
        if row == 1 {
            self.offset_y_row1
        } else {
            self.offset_y
        }
    }
}

/// Word-wrapped prompt label placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelGeometry {
    /// Baseline offset from the cell origin (negative is above the cover).
    pub offset_y: f64,
    /// Distance between wrapped lines.
    pub line_height: f64,
    /// Wrap width.
    pub max_width: f64,
    /// Font size in pixels.
    pub font_px: f32,
    /// Label printed when a cell carries no explicit prompt text.
    pub defaults: &'static [&'static str; GRID_CELLS],
}

impl LabelGeometry {
    /// Default label for grid index `idx`.
    pub fn default_label(&self, idx: usize) -> &'static str {
        self.defaults.get(idx).copied().unwrap_or_default()
    }
}

/// Footer listing up to four extra entries under the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtraEntriesGeometry {
    /// Header text drawn once.
    pub header: &'static str,
    /// Header anchor.
    pub header_at: Point,
    /// Header font size in pixels.
    pub header_font_px: f32,
    /// Anchor of the first footer slot.
    pub origin: Point,
    /// Horizontal distance between footer slots.
    pub stride_x: f64,
    /// Distance between wrapped lines.
    pub line_height: f64,
    /// Wrap width per slot.
    pub max_width: f64,
    /// Entry font size in pixels.
    pub font_px: f32,
}

impl ExtraEntriesGeometry {
    /// Anchor of footer slot `slot` (0..4).
    pub fn slot_anchor(&self, slot: usize) -> Point {
        self.origin + Vec2::new(slot as f64 * self.stride_x, 0.0)
    }
}

/// Static description of one board family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardFamily {
    /// Board this family lays out.
    pub board_id: BoardId,
    /// Canvas size for boards of up to 25 cells.
    pub canvas: Canvas,
    /// Background template for boards of up to 25 cells.
    pub template: &'static str,
    /// Cover grid.
    pub grid: GridGeometry,
    /// Rating icons, when the board shows ratings.
    pub stars: Option<StarGeometry>,
    /// Hard-mode badge, when the board supports it.
    pub hard_mode: Option<BadgeGeometry>,
    /// Cell titles, when the board prints them.
    pub title: Option<TitleGeometry>,
    /// Prompt labels, when the board prints them.
    pub label: Option<LabelGeometry>,
    /// Footer variant selected for more than 25 cells.
    pub extra: Option<ExtraVariant>,
}

/// Alternate geometry for boards carrying extra entries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtraVariant {
    /// Taller canvas.
    pub canvas: Canvas,
    /// Template with the footer region.
    pub template: &'static str,
    /// Footer layout.
    pub entries: ExtraEntriesGeometry,
}

/// Feature switches derived from a resolved configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Rating icons are drawn.
    pub show_stars: bool,
    /// Hard-mode badges are drawn.
    pub show_hard_mode: bool,
    /// Cell titles are drawn.
    pub show_cell_title: bool,
    /// Prompt labels are drawn.
    pub show_prompt_label: bool,
    /// The extra-entries footer is drawn.
    pub extra_entries: bool,
}

/// Concrete layout for one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardConfig {
    /// Board being rendered.
    pub board_id: BoardId,
    /// Output canvas.
    pub canvas: Canvas,
    /// Background template asset name (without extension).
    pub template: &'static str,
    /// Cover grid.
    pub grid: GridGeometry,
    /// Rating icons.
    pub stars: Option<StarGeometry>,
    /// Hard-mode badge.
    pub hard_mode: Option<BadgeGeometry>,
    /// Cell titles.
    pub title: Option<TitleGeometry>,
    /// Prompt labels.
    pub label: Option<LabelGeometry>,
    /// Extra-entries footer, active only for the tall variant.
    pub extra_entries: Option<ExtraEntriesGeometry>,
}

impl BoardConfig {
    /// Feature switches for this layout.
    pub fn features(&self) -> FeatureFlags {
        FeatureFlags {
            show_stars: self.stars.is_some(),
            show_hard_mode: self.hard_mode.is_some(),
            show_cell_title: self.title.is_some(),
            show_prompt_label: self.label.is_some(),
            extra_entries: self.extra_entries.is_some(),
        }
    }

    /// Whether any text layer can be drawn with this layout.
    pub fn draws_text(&self) -> bool {
        self.title.is_some() || self.label.is_some() || self.extra_entries.is_some()
    }

    /// File name of the background template.
    pub fn template_file(&self) -> String {
        format!("{}.png", self.template)
    }
}

impl BoardFamily {
    /// Select the variant for `cell_count` cells.
    ///
    /// Only families with an extra-entries variant look at the count; they switch when it exceeds
    /// the 25-cell grid.
    pub fn configure(&self, cell_count: usize) -> BoardConfig {
        let base = BoardConfig {
            board_id: self.board_id,
            canvas: self.canvas,
            template: self.template,
            grid: self.grid,
            stars: self.stars,
            hard_mode: self.hard_mode,
            title: self.title,
            label: self.label,
            extra_entries: None,
        };
        match self.extra {
            Some(extra) if cell_count > GRID_CELLS => BoardConfig {
                canvas: extra.canvas,
                template: extra.template,
                extra_entries: Some(extra.entries),
                ..base
            },
            _ => base,
        }
    }
}

/// Immutable catalog of board families.
#[derive(Debug)]
pub struct BoardConfigRegistry {
    families: &'static [BoardFamily],
}

impl Default for BoardConfigRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BoardConfigRegistry {
    /// Registry over the compiled-in catalog.
    pub fn builtin() -> Self {
        Self {
            families: catalog::FAMILIES,
        }
    }

    /// Family description for `id`.
    pub fn family(&self, id: BoardId) -> BoardResult<&BoardFamily> {
        self.families
            .iter()
            .find(|f| f.board_id == id)
            .ok_or_else(|| BoardError::unknown_board(id.as_str()))
    }

    /// Resolve the layout for `board_id` rendered with `cell_count` cells.
    pub fn resolve(&self, board_id: &str, cell_count: usize) -> BoardResult<BoardConfig> {
        let id: BoardId = board_id.parse()?;
        Ok(self.family(id)?.configure(cell_count))
    }

    /// All families in catalog order.
    pub fn families(&self) -> impl Iterator<Item = &BoardFamily> {
        self.families.iter()
    }
}

/// Resolve against the compiled-in catalog.
pub fn resolve(board_id: &str, cell_count: usize) -> BoardResult<BoardConfig> {
    BoardConfigRegistry::builtin().resolve(board_id, cell_count)
}

#[cfg(test)]
#[path = "../../tests/unit/board/registry.rs"]
mod tests;
