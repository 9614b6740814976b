//! Rating icons and the hard-mode badge.

use crate::{
    assets::decode::RasterImage,
    board::registry::{BadgeGeometry, StarGeometry},
    foundation::core::{Point, Rect},
    foundation::error::BoardResult,
    render::surface::DrawSurface,
};

/// Icons drawn for one rating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RatingIcons {
    /// Whole icons.
    pub full: u32,
    /// Whether a trailing half icon is drawn.
    pub half: bool,
}

impl RatingIcons {
    /// Icons for `rating` (already clamped to the rating range).
    ///
    /// Without half-icon support the fractional remainder is dropped.
    pub fn for_rating(rating: f64, half_icons: bool) -> Self {
        let rating = if rating.is_finite() { rating.max(0.0) } else { 0.0 };
        Self {
            full: rating.floor() as u32,
            half: half_icons && rating.fract() != 0.0,
        }
    }
}

/// Draw `rating` as icons starting at `cell_origin + geometry.offset`.
///
/// Whole icons step by the geometry's pitch; a fractional remainder on a half-capable layout adds
/// one icon clipped to the left half of its box.
pub fn draw_rating<S: DrawSurface + ?Sized>(
    surface: &mut S,
    icon: &RasterImage,
    geometry: &StarGeometry,
    cell_origin: Point,
    rating: f64,
) -> BoardResult<RatingIcons> {
    let icons = RatingIcons::for_rating(rating, geometry.supports_half_icons());
    let first = cell_origin + geometry.offset;
    let step = geometry.pitch_vec();

    for k in 0..icons.full {
        let at = first + step * f64::from(k);
        surface.draw_image(icon, Rect::from_origin_size(at, geometry.icon))?;
    }
    if icons.half {
        let at = first + step * f64::from(icons.full);
        surface.draw_image_clipped(
            icon,
            Rect::from_origin_size(at, geometry.icon),
            geometry.icon.width / 2.0,
        )?;
    }
    Ok(icons)
}

/// Draw the hard-mode badge for the cell at `cell_origin`.
pub fn draw_badge<S: DrawSurface + ?Sized>(
    surface: &mut S,
    badge: &RasterImage,
    geometry: &BadgeGeometry,
    cell_origin: Point,
) -> BoardResult<()> {
    surface.draw_image(
        badge,
        Rect::from_origin_size(cell_origin + geometry.offset, geometry.size),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
