//! The drawing seam shared by the raster and recording surfaces.

use crate::{
    assets::decode::RasterImage,
    foundation::core::{Canvas, Rect, TextAlign},
    foundation::error::BoardResult,
};

/// Mutable drawing state for one render: a pixel surface plus the active font size and alignment.
///
/// Text draws use whatever font and alignment were set last, so callers drive a surface strictly
/// in order. A surface belongs to exactly one render.
pub trait DrawSurface {
    /// Surface dimensions.
    fn canvas(&self) -> Canvas;

    /// Set the font size used by later text measurements and draws.
    fn set_font(&mut self, size_px: f32);

    /// Set the alignment used by later text draws.
    fn set_align(&mut self, align: TextAlign);

    /// Draw `image` scaled into `dst`.
    fn draw_image(&mut self, image: &RasterImage, dst: Rect) -> BoardResult<()>;

    /// Draw `image` scaled into `dst`, keeping only the leftmost `clip_width` pixels of `dst`.
    fn draw_image_clipped(
        &mut self,
        image: &RasterImage,
        dst: Rect,
        clip_width: f64,
    ) -> BoardResult<()>;

    /// Advance width of `text` under the active font.
    fn measure_text(&mut self, text: &str) -> BoardResult<f64>;

    /// Draw `text` with its baseline at `y`, aligned on `x`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> BoardResult<()>;
}

/// A draw call captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Full image draw.
    Image {
        /// Source image dimensions.
        src: (u32, u32),
        /// Destination rectangle.
        dst: Rect,
    },
    /// Image draw clipped to the left part of its destination.
    ImageClipped {
        /// Source image dimensions.
        src: (u32, u32),
        /// Unclipped destination rectangle.
        dst: Rect,
        /// Width kept from the left edge of `dst`.
        clip_width: f64,
    },
    /// Text draw.
    Text {
        /// Drawn text.
        text: String,
        /// Anchor x.
        x: f64,
        /// Baseline y.
        y: f64,
        /// Font size at draw time.
        font_px: f32,
        /// Alignment at draw time.
        align: TextAlign,
    },
}

/// Surface that records draw calls instead of rasterizing them.
///
/// Text is measured as if every character were half the font size wide, which keeps layout
/// inspection independent of installed fonts.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    font_px: f32,
    align: TextAlign,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Font size in effect before any `set_font` call.
    pub const DEFAULT_FONT_PX: f32 = 20.0;

    /// Create an empty recording of a `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            font_px: Self::DEFAULT_FONT_PX,
            align: TextAlign::Left,
            ops: Vec::new(),
        }
    }

    /// Captured draw calls in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Captured text draws as `(text, x, y)`.
    pub fn text_draws(&self) -> Vec<(String, f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, x, y, .. } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Destination rectangles of full image draws.
    pub fn image_draws(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { dst, .. } => Some(*dst),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn set_font(&mut self, size_px: f32) {
        self.font_px = size_px;
    }

    fn set_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn draw_image(&mut self, image: &RasterImage, dst: Rect) -> BoardResult<()> {
        self.ops.push(DrawOp::Image {
            src: (image.width, image.height),
            dst,
        });
        Ok(())
    }

    fn draw_image_clipped(
        &mut self,
        image: &RasterImage,
        dst: Rect,
        clip_width: f64,
    ) -> BoardResult<()> {
        self.ops.push(DrawOp::ImageClipped {
            src: (image.width, image.height),
            dst,
            clip_width,
        });
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> BoardResult<f64> {
        Ok(text.chars().count() as f64 * f64::from(self.font_px) / 2.0)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> BoardResult<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font_px: self.font_px,
            align: self.align,
        });
        Ok(())
    }
}
