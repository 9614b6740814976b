//! Board composition: background, cells, overlays and footer in drawing order.

use std::{path::PathBuf, sync::Arc};

use crate::{
    assets::decode::RasterImage,
    assets::loader::AssetLoader,
    board::model::{EXTRA_CELLS, GRID_CELLS, PromptCell, display_title, validate_cells},
    board::registry::{BoardConfig, BoardConfigRegistry},
    cover::fetch::{CoverError, CoverFetcher},
    cover::pipeline::CoverPipeline,
    foundation::core::{Rect, TextAlign},
    foundation::error::{BoardError, BoardResult},
    render::cpu::CpuSurface,
    render::overlay::{draw_badge, draw_rating},
    render::surface::DrawSurface,
    text::wrap::wrap_draw,
};

const COLUMNS: usize = 5;

/// Renderer configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RendererOpts {
    /// Directory holding templates, icons and the font.
    pub assets_root: PathBuf,
    /// Font file used for every text layer.
    pub font_file: String,
    /// Rating icon file.
    pub star_icon: String,
    /// Hard-mode badge file.
    pub hard_mode_icon: String,
}

impl Default for RendererOpts {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("assets"),
            font_file: "font.ttf".to_string(),
            star_icon: "star.png".to_string(),
            hard_mode_icon: "hardmode.png".to_string(),
        }
    }
}

impl RendererOpts {
    /// Defaults overridden by `BINGO_ASSETS_DIR` and `BINGO_FONT_FILE` when set.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(dir) = std::env::var_os("BINGO_ASSETS_DIR").filter(|v| !v.is_empty()) {
            opts.assets_root = PathBuf::from(dir);
        }
        if let Ok(font) = std::env::var("BINGO_FONT_FILE")
            && !font.trim().is_empty()
        {
            opts.font_file = font;
        }
        opts
    }
}

/// Composes boards: background, per-cell covers and overlays, then the optional footer.
///
/// The renderer owns the memoized asset loader and may be shared across threads; every render
/// gets its own surface.
#[derive(Debug)]
pub struct BoardRenderer {
    opts: RendererOpts,
    registry: BoardConfigRegistry,
    assets: AssetLoader,
    covers: CoverPipeline,
}

impl BoardRenderer {
    /// Renderer reading assets per `opts` and fetching covers through `fetcher`.
    pub fn new(opts: RendererOpts, fetcher: Arc<dyn CoverFetcher>) -> Self {
        Self {
            assets: AssetLoader::new(opts.assets_root.clone()),
            registry: BoardConfigRegistry::builtin(),
            covers: CoverPipeline::new(fetcher),
            opts,
        }
    }

    /// Board catalog used by [`BoardRenderer::render_board`].
    pub fn registry(&self) -> &BoardConfigRegistry {
        &self.registry
    }

    /// Memoized asset loader.
    pub fn assets(&self) -> &AssetLoader {
        &self.assets
    }

    /// Resolve `board_id` for `cells` and render it to PNG bytes.
    pub fn render_board(&self, board_id: &str, cells: &[PromptCell]) -> BoardResult<Vec<u8>> {
        let config = self.registry.resolve(board_id, cells.len())?;
        self.render(&config, cells)
    }

    /// Render `cells` with `config` to PNG bytes.
    #[tracing::instrument(skip(self, config, cells), fields(board = %config.board_id, cells = cells.len()))]
    pub fn render(&self, config: &BoardConfig, cells: &[PromptCell]) -> BoardResult<Vec<u8>> {
        validate_cells(cells)?;
        // Background failures are reported ahead of font failures.
        self.template(config)?;
        let font = if needs_font(config, cells) {
            Some(self.font()?)
        } else {
            None
        };
        let mut surface = CpuSurface::new(config.canvas, font.as_deref().map(Vec::as_slice))?;

        if let Err(e) = self.render_onto(config, cells, &mut surface) {
            tracing::warn!(error = %e, cell = ?e.cell(), "board render aborted");
            return Err(e);
        }

        let png = surface.finish_png()?;
        tracing::info!(bytes = png.len(), "board rendered");
        Ok(png)
    }

    /// Draw every layer of the board onto `surface`, in order.
    ///
    /// Any failure aborts the remaining layers.
    pub fn render_onto<S: DrawSurface + ?Sized>(
        &self,
        config: &BoardConfig,
        cells: &[PromptCell],
        surface: &mut S,
    ) -> BoardResult<()> {
        validate_cells(cells)?;
        surface.set_align(TextAlign::Center);

        let background = self.template(config)?;
        surface.draw_image(
            &background,
            Rect::new(
                0.0,
                0.0,
                f64::from(background.width),
                f64::from(background.height),
            ),
        )?;

        // Icons load only when some cell will actually use them.
        let grid_cells = || cells.iter().take(GRID_CELLS).filter(|c| c.is_filled);
        let star_icon = match config.stars {
            Some(_) if grid_cells().any(|c| c.clamped_rating() > 0.0) => {
                Some(self.icon(&self.opts.star_icon)?)
            }
            _ => None,
        };
        let badge_icon = match config.hard_mode {
            Some(_) if grid_cells().any(|c| c.hard_mode) => {
                Some(self.icon(&self.opts.hard_mode_icon)?)
            }
            _ => None,
        };

        for idx in 0..GRID_CELLS {
            let row = idx / COLUMNS;
            let col = idx % COLUMNS;
            let origin = config.grid.cell_origin(row, col);
            let cell = cells.get(idx);

            if let Some(cell) = cell.filter(|c| c.is_filled) {
                let cover = self.cover(config, idx, cell)?;
                surface.draw_image(&cover, config.grid.cover_rect(row, col))?;

                if let (Some(stars), Some(icon)) = (&config.stars, &star_icon) {
                    draw_rating(surface, icon, stars, origin, cell.clamped_rating())?;
                }
                if let (Some(badge), Some(icon)) = (&config.hard_mode, &badge_icon)
                    && cell.hard_mode
                {
                    draw_badge(surface, icon, badge, origin)?;
                }
                if let Some(title) = &config.title
                    && !cell.display_title().is_empty()
                {
                    surface.set_font(title.font_px);
                    wrap_draw(
                        surface,
                        cell.display_title(),
                        config.grid.center_x(row, col),
                        origin.y + title.offset_for_row(row),
                        title.line_height,
                        title.max_width,
                    )?;
                }
                tracing::debug!(idx, row, col, "drew cell");
            }

            if let Some(label) = &config.label {
                let text = cell
                    .and_then(PromptCell::label_override)
                    .unwrap_or_else(|| label.default_label(idx));
                surface.set_font(label.font_px);
                wrap_draw(
                    surface,
                    text,
                    config.grid.center_x(row, col),
                    origin.y + label.offset_y,
                    label.line_height,
                    label.max_width,
                )?;
            }
        }

        if let Some(extra) = &config.extra_entries {
            surface.set_font(extra.header_font_px);
            surface.fill_text(extra.header, extra.header_at.x, extra.header_at.y)?;

            surface.set_font(extra.font_px);
            for slot in 0..EXTRA_CELLS {
                let Some(cell) = cells.get(GRID_CELLS + slot).filter(|c| c.is_filled) else {
                    continue;
                };
                let at = extra.slot_anchor(slot);
                let title = display_title(&cell.title);
                let text = match cell.author.trim() {
                    "" => title.to_string(),
                    author => format!("{title} by {author}"),
                };
                wrap_draw(surface, &text, at.x, at.y, extra.line_height, extra.max_width)?;
            }
        }

        Ok(())
    }

    fn template(&self, config: &BoardConfig) -> BoardResult<Arc<RasterImage>> {
        let name = config.template_file();
        self.assets
            .image(&name)
            .map_err(|e| BoardError::TemplateLoad {
                board_id: config.board_id.to_string(),
                template: name,
                reason: e.to_string(),
            })
    }

    fn font(&self) -> BoardResult<Arc<Vec<u8>>> {
        let name = &self.opts.font_file;
        self.assets
            .font(name)
            .map_err(|e| BoardError::asset(format!("font '{name}': {e}")))
    }

    fn icon(&self, name: &str) -> BoardResult<Arc<RasterImage>> {
        self.assets
            .image(name)
            .map_err(|e| BoardError::asset(format!("icon '{name}': {e}")))
    }

    fn cover(&self, config: &BoardConfig, idx: usize, cell: &PromptCell) -> BoardResult<RasterImage> {
        let url = &cell.cover_image_link;
        self.covers
            .fetch_and_normalize(url)
            .map_err(|e| match e {
                CoverError::Fetch(reason) => BoardError::CoverFetch {
                    board_id: config.board_id.to_string(),
                    cell: idx,
                    url: url.clone(),
                    reason,
                },
                CoverError::Decode(reason) => BoardError::CoverDecode {
                    board_id: config.board_id.to_string(),
                    cell: idx,
                    url: url.clone(),
                    reason,
                },
            })
    }
}

/// Whether rendering `cells` with `config` will draw any text.
fn needs_font(config: &BoardConfig, cells: &[PromptCell]) -> bool {
    if !config.draws_text() {
        return false;
    }
    if config.label.is_some() || config.extra_entries.is_some() {
        return true;
    }
    config.title.is_some()
        && cells
            .iter()
            .take(GRID_CELLS)
            .any(|c| c.is_filled && !c.display_title().is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/render/board.rs"]
mod tests;
