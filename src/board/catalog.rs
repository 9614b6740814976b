//! Compiled-in layout values for every board family.
//!
//! Values were tuned by hand against each background template; small differences between
//! families are intentional.

use crate::{
    board::model::GRID_CELLS,
    board::registry::{
        BadgeGeometry, BoardFamily, BoardId, ExtraEntriesGeometry, ExtraVariant, GridGeometry,
        LabelGeometry, StarGeometry, StarLayout, TitleGeometry,
    },
    foundation::core::{Canvas, Point, Size, Vec2},
};

pub(crate) static FAMILIES: &[BoardFamily] = &[
    FULLYBOOKED24,
    FULLYBOOKED25,
    RFANTASY24,
    GAMEBINGO25,
    SCREENBINGO25,
];

const LEGACY_GRID: GridGeometry = GridGeometry {
    origin: Point::new(130.0, 332.0),
    stride_x: 370.0,
    stride_y: 400.0,
    cover: Size::new(254.0, 316.0),
};

// Star column sits at x = 80 on the template, 50px left of the cover edge.
const LEGACY_STARS: StarGeometry = StarGeometry {
    offset: Vec2::new(-50.0, 10.0),
    pitch: 60.5,
    icon: Size::new(42.0, 44.0),
    layout: StarLayout::Stacked,
};

const FULLYBOOKED24: BoardFamily = BoardFamily {
    board_id: BoardId::FullyBooked24,
    canvas: Canvas::new(2000, 2300),
    template: "fullybooked24",
    grid: LEGACY_GRID,
    stars: Some(LEGACY_STARS),
    hard_mode: None,
    title: None,
    label: None,
    extra: None,
};

const FULLYBOOKED25: BoardFamily = BoardFamily {
    board_id: BoardId::FullyBooked25,
    canvas: Canvas::new(2000, 2400),
    template: "fullybooked25",
    grid: GridGeometry {
        origin: Point::new(130.0, 342.0),
        stride_x: 370.0,
        stride_y: 405.0,
        cover: Size::new(254.0, 290.0),
    },
    stars: Some(StarGeometry {
        offset: Vec2::new(12.0, 296.0),
        pitch: 46.0,
        icon: Size::new(42.0, 44.0),
        layout: StarLayout::Row { half_icons: true },
    }),
    hard_mode: Some(BadgeGeometry {
        offset: Vec2::new(204.0, -20.0),
        size: Size::new(60.0, 60.0),
    }),
    title: Some(TitleGeometry {
        offset_y: 364.0,
        offset_y_row1: 371.0,
        line_height: 22.0,
        max_width: 300.0,
        font_px: 20.0,
    }),
    label: None,
    extra: Some(ExtraVariant {
        canvas: Canvas::new(2000, 2750),
        template: "fullybooked25_extra",
        entries: ExtraEntriesGeometry {
            header: "Other short stories read:",
            header_at: Point::new(1000.0, 2430.0),
            header_font_px: 32.0,
            origin: Point::new(257.0, 2500.0),
            stride_x: 495.0,
            line_height: 28.0,
            max_width: 440.0,
            font_px: 24.0,
        },
    }),
};

const RFANTASY24: BoardFamily = BoardFamily {
    board_id: BoardId::RFantasy24,
    canvas: Canvas::new(2000, 2300),
    template: "rfantasy24",
    grid: LEGACY_GRID,
    stars: Some(LEGACY_STARS),
    hard_mode: Some(BadgeGeometry {
        offset: Vec2::new(214.0, -18.0),
        size: Size::new(56.0, 56.0),
    }),
    title: Some(TitleGeometry {
        offset_y: 340.0,
        offset_y_row1: 346.0,
        line_height: 21.0,
        max_width: 320.0,
        font_px: 20.0,
    }),
    label: Some(LabelGeometry {
        offset_y: -22.0,
        line_height: 20.0,
        max_width: 330.0,
        font_px: 18.0,
        defaults: &RFANTASY24_PROMPTS,
    }),
    extra: None,
};

const GAMEBINGO25: BoardFamily = BoardFamily {
    board_id: BoardId::GameBingo25,
    canvas: Canvas::new(2000, 2400),
    template: "gamebingo25",
    grid: GridGeometry {
        origin: Point::new(140.0, 360.0),
        stride_x: 368.0,
        stride_y: 405.0,
        cover: Size::new(240.0, 300.0),
    },
    stars: Some(StarGeometry {
        offset: Vec2::new(8.0, 306.0),
        pitch: 45.0,
        icon: Size::new(40.0, 42.0),
        layout: StarLayout::Row { half_icons: true },
    }),
    hard_mode: None,
    title: Some(TitleGeometry {
        offset_y: 372.0,
        offset_y_row1: 378.0,
        line_height: 22.0,
        max_width: 320.0,
        font_px: 20.0,
    }),
    label: Some(LabelGeometry {
        offset_y: -20.0,
        line_height: 22.0,
        max_width: 330.0,
        font_px: 22.0,
        defaults: &GAMEBINGO25_PROMPTS,
    }),
    extra: None,
};

const SCREENBINGO25: BoardFamily = BoardFamily {
    board_id: BoardId::ScreenBingo25,
    canvas: Canvas::new(2000, 2400),
    template: "screenbingo25",
    grid: GridGeometry {
        origin: Point::new(135.0, 352.0),
        stride_x: 370.0,
        stride_y: 402.0,
        cover: Size::new(240.0, 330.0),
    },
    stars: Some(StarGeometry {
        offset: Vec2::new(-52.0, 8.0),
        pitch: 62.0,
        icon: Size::new(42.0, 44.0),
        layout: StarLayout::Stacked,
    }),
    hard_mode: None,
    title: None,
    label: Some(LabelGeometry {
        offset_y: -16.0,
        line_height: 22.0,
        max_width: 340.0,
        font_px: 22.0,
        defaults: &SCREENBINGO25_PROMPTS,
    }),
    extra: None,
};

const RFANTASY24_PROMPTS: [&str; GRID_CELLS] = [
    "First in a Series",
    "Alliterative Title",
    "Under the Surface",
    "Criminals",
    "Dreams",
    "Entitled Animals",
    "Bards",
    "Prologues and Epilogues",
    "Self Published or Indie Publisher",
    "Romantasy",
    "Dark Academia",
    "Multi-POV",
    "Published in 2024",
    "Character with a Disability",
    "Published in the 80s",
    "Space Opera",
    "Author of Color",
    "Survival",
    "Judge a Book by its Cover",
    "Set in a Small Town",
    "Five Short Stories",
    "Eldritch Creatures",
    "Reference Materials",
    "Book Club or Readalong Book",
    "Knights and Paladins",
];

const GAMEBINGO25_PROMPTS: [&str; GRID_CELLS] = [
    "Released This Year",
    "Indie Darling",
    "Couch Co-op",
    "Over 40 Hours",
    "Under 5 Hours",
    "Pixel Art",
    "Soulslike",
    "From Your Backlog",
    "Roguelike",
    "Rhythm or Music",
    "Open World",
    "Silent Protagonist",
    "Free Space: Replay a Favorite",
    "Horror",
    "Puzzle",
    "Sports or Racing",
    "Developed Outside the US or Japan",
    "Remake or Remaster",
    "Turn-Based Combat",
    "Gifted to You",
    "Based on a Book or Film",
    "Handheld",
    "Platinum or 100%",
    "Older Than You",
    "Recommended by a Friend",
];

const SCREENBINGO25_PROMPTS: [&str; GRID_CELLS] = [
    "Oscar Winner",
    "Miniseries",
    "Animated",
    "Documentary",
    "Foreign Language",
    "Released Before 1980",
    "Sequel",
    "Book Adaptation",
    "Horror",
    "Musical",
    "Rewatch a Favorite",
    "Over Three Hours",
    "Free Space",
    "Anthology",
    "Cult Classic",
    "Debut Director",
    "Set in Space",
    "Heist",
    "Coming of Age",
    "Based on a True Story",
    "Black and White",
    "Limited Theatrical Release",
    "Holiday Themed",
    "Watched in a Theater",
    "Recommended by a Friend",
];
