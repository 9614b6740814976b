use std::{
    io::Cursor,
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
};

use super::*;
use crate::{
    foundation::core::{Point, Size},
    render::surface::{DrawOp, RecordingSurface},
};

#[derive(Default)]
struct StubFetcher {
    calls: AtomicUsize,
}

impl CoverFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, CoverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.contains("unreachable") {
            return Err(CoverError::Fetch("connection refused".to_string()));
        }
        Ok(png_bytes(6, 8))
    }
}

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "bingo_board_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([40, 80, 120, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn write_assets(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    for name in [
        "fullybooked24",
        "fullybooked25",
        "fullybooked25_extra",
        "rfantasy24",
        "gamebingo25",
        "screenbingo25",
    ] {
        std::fs::write(dir.join(format!("{name}.png")), png_bytes(4, 4)).unwrap();
    }
    std::fs::write(dir.join("star.png"), png_bytes(10, 10)).unwrap();
    std::fs::write(dir.join("hardmode.png"), png_bytes(12, 12)).unwrap();
}

fn fixture(name: &str) -> (PathBuf, BoardRenderer, Arc<StubFetcher>) {
    let dir = temp_dir(name);
    write_assets(&dir);
    let fetcher = Arc::new(StubFetcher::default());
    let opts = RendererOpts {
        assets_root: dir.clone(),
        ..RendererOpts::default()
    };
    let renderer = BoardRenderer::new(opts, fetcher.clone());
    (dir, renderer, fetcher)
}

fn draw_onto(
    renderer: &BoardRenderer,
    board_id: &str,
    cells: &[PromptCell],
) -> BoardResult<RecordingSurface> {
    let config = renderer.registry().resolve(board_id, cells.len())?;
    let mut surface = RecordingSurface::new(config.canvas.width, config.canvas.height);
    renderer.render_onto(&config, cells, &mut surface)?;
    Ok(surface)
}

#[test]
fn default_opts_point_at_local_assets() {
    let opts = RendererOpts::default();
    assert_eq!(opts.assets_root, PathBuf::from("assets"));
    assert_eq!(opts.font_file, "font.ttf");
    assert_eq!(opts.star_icon, "star.png");
    assert_eq!(opts.hard_mode_icon, "hardmode.png");
}

#[test]
fn unfilled_board_draws_only_the_background() {
    let (dir, renderer, fetcher) = fixture("render_unfilled");
    let cells = vec![PromptCell::default(); 25];

    let surface = draw_onto(&renderer, "fullybooked24", &cells).unwrap();
    assert_eq!(
        surface.ops(),
        &[DrawOp::Image {
            src: (4, 4),
            dst: Rect::new(0.0, 0.0, 4.0, 4.0),
        }]
    );
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    assert_eq!(renderer.assets().load_count("star.png"), 0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn filled_center_cell_gets_cover_stars_and_title() {
    let (dir, renderer, fetcher) = fixture("render_center");
    let mut cells = vec![PromptCell::default(); 25];
    cells[12] = PromptCell::filled("The Hobbit (Illustrated)", "https://covers.test/hobbit.jpg", 4.0);

    let surface = draw_onto(&renderer, "fullybooked25", &cells).unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

    let images = surface.image_draws();
    assert_eq!(images.len(), 6);
    assert_eq!(
        images[1],
        Rect::from_origin_size(Point::new(870.0, 1152.0), Size::new(254.0, 290.0))
    );
    for (k, star) in images[2..].iter().enumerate() {
        assert_eq!(star.origin(), Point::new(882.0 + 46.0 * k as f64, 1448.0));
    }

    assert_eq!(
        surface.text_draws(),
        vec![("The Hobbit".to_string(), 997.0, 1516.0)]
    );
    let Some(DrawOp::Text { font_px, align, .. }) = surface.ops().last() else {
        panic!("title should be the last draw");
    };
    assert_eq!(*font_px, 20.0);
    assert_eq!(*align, TextAlign::Center);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn half_rating_clips_the_last_icon() {
    let (dir, renderer, _) = fixture("render_half");
    let cells = vec![PromptCell::filled("Piranesi", "https://covers.test/p.png", 3.5)];

    let surface = draw_onto(&renderer, "fullybooked25", &cells).unwrap();
    let clipped: Vec<_> = surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::ImageClipped { dst, clip_width, .. } => Some((*dst, *clip_width)),
            _ => None,
        })
        .collect();
    // Background, cover and three full icons.
    assert_eq!(surface.image_draws().len(), 5);
    assert_eq!(clipped.len(), 1);
    assert_eq!(clipped[0].0.origin(), Point::new(130.0 + 12.0 + 46.0 * 3.0, 342.0 + 296.0));
    assert_eq!(clipped[0].1, 21.0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn hard_mode_badge_sits_on_the_cover_corner() {
    let (dir, renderer, _) = fixture("render_badge");
    let mut cell = PromptCell::filled("Dune", "https://covers.test/dune.png", 0.0);
    cell.hard_mode = true;

    let surface = draw_onto(&renderer, "fullybooked25", &[cell]).unwrap();
    let images = surface.image_draws();
    assert_eq!(images.len(), 3);
    assert_eq!(
        images[2],
        Rect::from_origin_size(Point::new(334.0, 322.0), Size::new(60.0, 60.0))
    );
    assert_eq!(renderer.assets().load_count("star.png"), 0);
    assert_eq!(renderer.assets().load_count("hardmode.png"), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn second_row_titles_use_their_own_offset() {
    let (dir, renderer, _) = fixture("render_row1");
    let mut cells = vec![PromptCell::default(); 6];
    cells[0] = PromptCell::filled("Dune", "https://covers.test/a.png", 0.0);
    cells[5] = PromptCell::filled("Emma", "https://covers.test/b.png", 0.0);

    let surface = draw_onto(&renderer, "fullybooked25", &cells).unwrap();
    assert_eq!(
        surface.text_draws(),
        vec![
            ("Dune".to_string(), 257.0, 342.0 + 364.0),
            ("Emma".to_string(), 257.0, 342.0 + 405.0 + 371.0),
        ]
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn labels_fall_back_to_board_prompts() {
    let (dir, renderer, fetcher) = fixture("render_labels");
    let mut cells = vec![PromptCell::default(); 25];
    cells[0].prompt_text = Some("Custom prompt".to_string());
    cells[2].prompt_text = Some("   ".to_string());

    let surface = draw_onto(&renderer, "rfantasy24", &cells).unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);

    let texts = surface.text_draws();
    assert_eq!(texts[0], ("Custom prompt".to_string(), 257.0, 310.0));

    let config = renderer.registry().resolve("rfantasy24", 25).unwrap();
    let label = config.label.unwrap();
    for idx in [1, 2, 24] {
        let x = config.grid.center_x(idx / 5, idx % 5);
        let y0 = config.grid.cell_origin(idx / 5, idx % 5).y + label.offset_y;
        let lines: Vec<&str> = texts
            .iter()
            .filter(|(_, tx, ty)| *tx == x && *ty >= y0 && *ty < y0 + 200.0)
            .map(|(t, _, _)| t.as_str())
            .collect();
        assert_eq!(lines.join(" "), label.default_label(idx), "cell {idx}");
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn extra_entries_are_listed_under_the_grid() {
    let (dir, renderer, fetcher) = fixture("render_extra");
    let mut cells = vec![PromptCell::default(); 27];
    cells[25].is_filled = true;
    cells[25].title = "Story (Anthology)".to_string();
    cells[25].author = " Le Guin ".to_string();
    cells[26].is_filled = true;
    cells[26].title = "Untitled Fragment".to_string();
    cells[26].author = "  ".to_string();

    let config = renderer.registry().resolve("fullybooked25", cells.len()).unwrap();
    assert_eq!(config.template_file(), "fullybooked25_extra.png");

    let surface = draw_onto(&renderer, "fullybooked25", &cells).unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        surface.text_draws(),
        vec![
            ("Other short stories read:".to_string(), 1000.0, 2430.0),
            ("Story by Le Guin".to_string(), 257.0, 2500.0),
            ("Untitled Fragment".to_string(), 257.0 + 495.0, 2500.0),
        ]
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn cover_failure_aborts_with_the_cell_index() {
    let (dir, renderer, _) = fixture("render_cover_fail");
    let mut cells = vec![PromptCell::default(); 25];
    cells[1] = PromptCell::filled("Fine", "https://covers.test/ok.png", 2.0);
    cells[3] = PromptCell::filled("Broken", "https://unreachable.test/x.png", 2.0);
    cells[4] = PromptCell::filled("Never", "https://covers.test/later.png", 2.0);

    let err = renderer.render_board("fullybooked24", &cells).unwrap_err();
    match &err {
        BoardError::CoverFetch {
            board_id,
            cell,
            url,
            ..
        } => {
            assert_eq!(board_id, "fullybooked24");
            assert_eq!(*cell, 3);
            assert_eq!(url, "https://unreachable.test/x.png");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.cell(), Some(3));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn undecodable_cover_is_a_decode_error() {
    struct Garbage;
    impl CoverFetcher for Garbage {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>, CoverError> {
            Ok(b"<html>not an image</html>".to_vec())
        }
    }

    let dir = temp_dir("render_cover_garbage");
    write_assets(&dir);
    let renderer = BoardRenderer::new(
        RendererOpts {
            assets_root: dir.clone(),
            ..RendererOpts::default()
        },
        Arc::new(Garbage),
    );
    let cells = vec![PromptCell::filled("X", "//covers.test/x.png", 1.0)];
    let err = draw_onto(&renderer, "fullybooked24", &cells).unwrap_err();
    assert!(matches!(err, BoardError::CoverDecode { cell: 0, .. }), "{err}");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_template_is_reported_per_board() {
    let dir = temp_dir("render_no_template");
    std::fs::create_dir_all(&dir).unwrap();
    let renderer = BoardRenderer::new(
        RendererOpts {
            assets_root: dir.clone(),
            ..RendererOpts::default()
        },
        Arc::new(StubFetcher::default()),
    );

    let err = draw_onto(&renderer, "screenbingo25", &[]).unwrap_err();
    match err {
        BoardError::TemplateLoad {
            board_id, template, ..
        } => {
            assert_eq!(board_id, "screenbingo25");
            assert_eq!(template, "screenbingo25.png");
        }
        other => panic!("unexpected error: {other}"),
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unknown_board_and_oversized_lists_are_rejected() {
    let (dir, renderer, _) = fixture("render_rejects");
    assert!(matches!(
        renderer.render_board("nope", &[]),
        Err(BoardError::UnknownBoard { .. })
    ));
    let cells = vec![PromptCell::default(); 30];
    assert!(matches!(
        renderer.render_board("fullybooked25", &cells),
        Err(BoardError::Validation(_))
    ));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unfilled_titled_board_renders_without_a_font() {
    let (dir, renderer, _) = fixture("render_no_font_needed");
    let png = renderer
        .render_board("fullybooked25", &vec![PromptCell::default(); 25])
        .unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (2000, 2400));
    assert_eq!(renderer.assets().load_count("font.ttf"), 0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_font_is_an_asset_error() {
    let (dir, renderer, _) = fixture("render_missing_font");
    let err = renderer.render_board("gamebingo25", &[]).unwrap_err();
    assert!(matches!(err, BoardError::Asset(ref msg) if msg.contains("font.ttf")), "{err}");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_template_is_reported_before_missing_font() {
    let dir = temp_dir("render_nothing");
    std::fs::create_dir_all(&dir).unwrap();
    let renderer = BoardRenderer::new(
        RendererOpts {
            assets_root: dir.clone(),
            ..RendererOpts::default()
        },
        Arc::new(StubFetcher::default()),
    );

    for board in ["gamebingo25", "rfantasy24", "screenbingo25", "fullybooked25"] {
        let err = renderer.render_board(board, &[]).unwrap_err();
        assert!(matches!(err, BoardError::TemplateLoad { .. }), "{board}: {err}");
        assert_eq!(err.board_id(), Some(board));
    }

    std::fs::remove_dir_all(&dir).ok();
}
