//! Raster decoding, PNG normalization and premultiplied-alpha conversions.

use std::{io::Cursor, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{BoardError, BoardResult};

/// Decoded raster in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Copy of the left `width` columns of this image.
    ///
    /// `width` is clamped to the image width and to at least one column.
    pub fn crop_left(&self, width: u32) -> RasterImage {
        let width = width.clamp(1, self.width.max(1));
        let src_stride = self.width as usize * 4;
        let dst_stride = width as usize * 4;
        let mut out = Vec::with_capacity(dst_stride * self.height as usize);
        for row in self.rgba8_premul.chunks_exact(src_stride.max(4)) {
            out.extend_from_slice(&row[..dst_stride.min(row.len())]);
        }
        RasterImage {
            width,
            height: self.height,
            rgba8_premul: Arc::new(out),
        }
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BoardResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(RasterImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Re-encode any supported raster encoding (JPEG, WebP, GIF, ...) as PNG.
///
/// Cover hosts do not reliably label their encodings, so every cover goes through this before
/// compositing.
pub fn normalize_to_png(bytes: &[u8]) -> BoardResult<Vec<u8>> {
    let dyn_img = image::load_from_memory(bytes).context("sniff and decode source image")?;
    let mut out = Vec::new();
    dyn_img
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("re-encode image as png")?;
    Ok(out)
}

/// Encode premultiplied RGBA8 pixels as PNG.
pub fn encode_png_premul(width: u32, height: u32, rgba8_premul: &[u8]) -> BoardResult<Vec<u8>> {
    let mut straight = rgba8_premul.to_vec();
    unpremultiply_rgba8_in_place(&mut straight);
    let img = image::RgbaImage::from_raw(width, height, straight)
        .ok_or_else(|| BoardError::encode("pixel buffer does not match canvas size"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| BoardError::encode(format!("png encode failed: {e}")))?;
    Ok(out)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
