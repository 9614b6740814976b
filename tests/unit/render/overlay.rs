use std::sync::Arc;

use super::*;
use crate::{
    board::registry::{StarLayout, resolve},
    foundation::core::{Size, Vec2},
    render::surface::{DrawOp, RecordingSurface},
};

fn icon() -> RasterImage {
    RasterImage {
        width: 8,
        height: 8,
        rgba8_premul: Arc::new(vec![255; 8 * 8 * 4]),
    }
}

fn row_geometry(half_icons: bool) -> StarGeometry {
    StarGeometry {
        offset: Vec2::new(10.0, 300.0),
        pitch: 46.0,
        icon: Size::new(42.0, 44.0),
        layout: StarLayout::Row { half_icons },
    }
}

#[test]
fn rating_icon_counts() {
    assert_eq!(
        RatingIcons::for_rating(3.5, true),
        RatingIcons { full: 3, half: true }
    );
    assert_eq!(
        RatingIcons::for_rating(3.5, false),
        RatingIcons { full: 3, half: false }
    );
    assert_eq!(
        RatingIcons::for_rating(4.0, true),
        RatingIcons { full: 4, half: false }
    );
    assert_eq!(RatingIcons::for_rating(0.0, true), RatingIcons::default());
    assert_eq!(RatingIcons::for_rating(f64::NAN, true), RatingIcons::default());
}

#[test]
fn half_capable_row_draws_three_and_a_half() {
    let mut surface = RecordingSurface::new(100, 100);
    let origin = Point::new(100.0, 200.0);
    draw_rating(&mut surface, &icon(), &row_geometry(true), origin, 3.5).unwrap();

    let ops = surface.ops();
    assert_eq!(ops.len(), 4);
    for (k, op) in ops[..3].iter().enumerate() {
        let DrawOp::Image { dst, .. } = op else {
            panic!("expected full icon, got {op:?}");
        };
        assert_eq!(dst.origin(), Point::new(110.0 + 46.0 * k as f64, 500.0));
        assert_eq!(dst.size(), Size::new(42.0, 44.0));
    }
    let DrawOp::ImageClipped { dst, clip_width, .. } = &ops[3] else {
        panic!("expected clipped icon, got {:?}", ops[3]);
    };
    assert_eq!(dst.origin(), Point::new(110.0 + 46.0 * 3.0, 500.0));
    assert_eq!(*clip_width, 21.0);
}

#[test]
fn non_fractional_family_drops_the_remainder() {
    let mut surface = RecordingSurface::new(100, 100);
    draw_rating(
        &mut surface,
        &icon(),
        &row_geometry(false),
        Point::ZERO,
        3.5,
    )
    .unwrap();
    assert_eq!(surface.image_draws().len(), 3);
    assert_eq!(surface.ops().len(), 3);
}

#[test]
fn legacy_stars_stack_downward() {
    let cfg = resolve("fullybooked24", 25).unwrap();
    let stars = cfg.stars.unwrap();
    let mut surface = RecordingSurface::new(2000, 2300);
    let origin = cfg.grid.cell_origin(0, 0);
    let drawn = draw_rating(&mut surface, &icon(), &stars, origin, 3.5).unwrap();
    assert_eq!(drawn, RatingIcons { full: 3, half: false });

    let ys: Vec<f64> = surface.image_draws().iter().map(|r| r.y0).collect();
    assert_eq!(ys, vec![342.0, 402.5, 463.0]);
    assert!(surface.image_draws().iter().all(|r| r.x0 == 80.0));
}

#[test]
fn badge_lands_at_cell_offset() {
    let cfg = resolve("rfantasy24", 25).unwrap();
    let badge = cfg.hard_mode.unwrap();
    let mut surface = RecordingSurface::new(2000, 2300);
    draw_badge(&mut surface, &icon(), &badge, cfg.grid.cell_origin(1, 2)).unwrap();
    assert_eq!(
        surface.image_draws(),
        vec![Rect::from_origin_size(
            Point::new(870.0 + 214.0, 732.0 - 18.0),
            Size::new(56.0, 56.0)
        )]
    );
}
