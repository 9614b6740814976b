//! `vello_cpu` raster surface.

use std::{
    collections::HashMap,
    sync::{Arc, Weak},
};

use crate::{
    assets::decode::{RasterImage, encode_png_premul},
    foundation::core::{Canvas, Rect, TextAlign},
    foundation::error::{BoardError, BoardResult},
    render::surface::DrawSurface,
    text::shaper::{TextBrushRgba8, TextShaper},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PaintKey {
    pixels: usize,
    crop_cols: u32,
}

struct CachedPaint {
    // Entries whose source pixels were dropped are purged before lookup, so a reused address
    // never hits a stale paint. One-off draws such as covers do not outlive their caller.
    pixels: Weak<Vec<u8>>,
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

struct TextFont {
    shaper: TextShaper,
    font: vello_cpu::peniko::FontData,
}

/// Raster surface powered by `vello_cpu`, with text shaped by Parley.
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    text: Option<TextFont>,
    font_px: f32,
    align: TextAlign,
    paints: HashMap<PaintKey, CachedPaint>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("canvas", &self.canvas)
            .field("has_font", &self.text.is_some())
            .field("font_px", &self.font_px)
            .field("align", &self.align)
            .finish()
    }
}

impl CpuSurface {
    /// Allocate a transparent surface of `canvas` size.
    ///
    /// `font_bytes` is required only if text will be measured or drawn.
    pub fn new(canvas: Canvas, font_bytes: Option<&[u8]>) -> BoardResult<Self> {
        let w = dim_u16(canvas.width, "width")?;
        let h = dim_u16(canvas.height, "height")?;

        let text = match font_bytes {
            Some(bytes) => Some(TextFont {
                shaper: TextShaper::new(bytes)?,
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    0,
                ),
            }),
            None => None,
        };

        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            text,
            font_px: 10.0,
            align: TextAlign::Left,
            paints: HashMap::new(),
        })
    }

    /// Rasterize everything drawn so far and encode it as PNG.
    pub fn finish_png(mut self) -> BoardResult<Vec<u8>> {
        let w = dim_u16(self.canvas.width, "width")?;
        let h = dim_u16(self.canvas.height, "height")?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        encode_png_premul(
            self.canvas.width,
            self.canvas.height,
            pixmap.data_as_u8_slice(),
        )
    }

    fn paint_for(&mut self, image: &RasterImage, crop_cols: u32) -> BoardResult<(vello_cpu::Image, u32, u32)> {
        self.paints.retain(|_, p| p.pixels.strong_count() > 0);
        let key = PaintKey {
            pixels: Arc::as_ptr(&image.rgba8_premul) as usize,
            crop_cols,
        };
        if let Some(p) = self.paints.get(&key) {
            return Ok((p.paint.clone(), p.w, p.h));
        }

        let cropped;
        let src = if crop_cols < image.width {
            cropped = image.crop_left(crop_cols);
            &cropped
        } else {
            image
        };
        let pixmap = pixmap_from_premul_bytes(&src.rgba8_premul, src.width, src.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        let (w, h) = (src.width, src.height);
        self.paints.insert(
            key,
            CachedPaint {
                pixels: Arc::downgrade(&image.rgba8_premul),
                paint: paint.clone(),
                w,
                h,
            },
        );
        Ok((paint, w, h))
    }

    fn fill_image(&mut self, paint: vello_cpu::Image, w: u32, h: u32, dst: Rect) {
        let sx = dst.width() / f64::from(w.max(1));
        let sy = dst.height() / f64::from(h.max(1));
        let tr = vello_cpu::kurbo::Affine::translate((dst.x0, dst.y0))
            * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy);

        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(tr);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
    }

    fn text_font(&mut self) -> BoardResult<&mut TextFont> {
        self.text
            .as_mut()
            .ok_or_else(|| BoardError::asset("no font configured for text layers"))
    }
}

impl DrawSurface for CpuSurface {
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
        let (paint, w, h) = self.paint_for(image, image.width)?;
        self.fill_image(paint, w, h, dst);
        Ok(())
    }

    fn draw_image_clipped(
        &mut self,
        image: &RasterImage,
        dst: Rect,
        clip_width: f64,
    ) -> BoardResult<()> {
        let dst_w = dst.width();
        if dst_w <= 0.0 || clip_width <= 0.0 {
            return Ok(());
        }
        let keep = (clip_width / dst_w).min(1.0);
        let cols = (f64::from(image.width) * keep).round().max(1.0) as u32;
        let (paint, w, h) = self.paint_for(image, cols)?;
        let clipped = Rect::new(dst.x0, dst.y0, dst.x0 + dst_w * keep, dst.y1);
        self.fill_image(paint, w, h, clipped);
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> BoardResult<f64> {
        let size = self.font_px;
        self.text_font()?.shaper.measure(text, size)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> BoardResult<()> {
        let size = self.font_px;
        let align = self.align;
        let tf = self
            .text
            .as_mut()
            .ok_or_else(|| BoardError::asset("no font configured for text layers"))?;
        let layout = tf.shaper.layout_line(text, size, TextBrushRgba8::BLACK)?;
        let Some(first) = layout.lines().next() else {
            return Ok(());
        };
        let baseline = f64::from(first.metrics().baseline);
        let x0 = align.start_x(x, f64::from(layout.width()));

        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((x0, y - baseline)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&tf.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }
}

fn dim_u16(v: u32, what: &str) -> BoardResult<u16> {
    u16::try_from(v).map_err(|_| BoardError::validation(format!("canvas {what} exceeds u16")))
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BoardResult<vello_cpu::Pixmap> {
    let w = dim_u16(width, "image width")?;
    let h = dim_u16(height, "image height")?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BoardError::asset("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
