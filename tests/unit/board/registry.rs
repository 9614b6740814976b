use super::*;

#[test]
fn board_ids_round_trip_through_strings() {
    for id in BoardId::ALL {
        assert_eq!(id.as_str().parse::<BoardId>().unwrap(), id);
        assert_eq!(id.to_string(), id.as_str());
    }
    assert!(matches!(
        "A".parse::<BoardId>().unwrap_err(),
        BoardError::UnknownBoard { .. }
    ));
}

#[test]
fn resolve_unknown_board_is_config_error() {
    let err = resolve("fullybooked", 25).unwrap_err();
    assert_eq!(err.board_id(), Some("fullybooked"));
    assert!(err.to_string().contains("config error"));
}

#[test]
fn resolve_documented_canvas_and_template_per_board() {
    let expected = [
        ("fullybooked24", (2000, 2300, "fullybooked24"), (2000, 2300, "fullybooked24")),
        (
            "fullybooked25",
            (2000, 2400, "fullybooked25"),
            (2000, 2750, "fullybooked25_extra"),
        ),
        ("rfantasy24", (2000, 2300, "rfantasy24"), (2000, 2300, "rfantasy24")),
        ("gamebingo25", (2000, 2400, "gamebingo25"), (2000, 2400, "gamebingo25")),
        ("screenbingo25", (2000, 2400, "screenbingo25"), (2000, 2400, "screenbingo25")),
    ];
    for (id, small, large) in expected {
        for (count, (w, h, template)) in [(0, small), (25, small), (26, large), (29, large)] {
            let cfg = resolve(id, count).unwrap();
            assert_eq!(cfg.canvas, Canvas::new(w, h), "{id} with {count} cells");
            assert_eq!(cfg.template, template, "{id} with {count} cells");
        }
    }
}

#[test]
fn extra_entries_only_above_threshold() {
    assert!(!resolve("fullybooked25", 25).unwrap().features().extra_entries);
    let cfg = resolve("fullybooked25", 26).unwrap();
    assert!(cfg.features().extra_entries);
    assert_eq!(cfg.template_file(), "fullybooked25_extra.png");
    let entries = cfg.extra_entries.unwrap();
    assert_eq!(entries.header, "Other short stories read:");

    for id in ["fullybooked24", "rfantasy24", "gamebingo25", "screenbingo25"] {
        assert!(!resolve(id, 29).unwrap().features().extra_entries, "{id}");
    }
}

#[test]
fn feature_flags_follow_family() {
    let legacy = resolve("fullybooked24", 25).unwrap().features();
    assert_eq!(
        legacy,
        FeatureFlags {
            show_stars: true,
            ..FeatureFlags::default()
        }
    );

    let rf = resolve("rfantasy24", 25).unwrap();
    assert!(rf.features().show_hard_mode);
    assert!(rf.features().show_prompt_label);
    assert!(!rf.stars.unwrap().supports_half_icons());

    let fb25 = resolve("fullybooked25", 25).unwrap();
    assert!(fb25.stars.unwrap().supports_half_icons());
    assert!(fb25.features().show_cell_title);
    assert!(!fb25.features().show_prompt_label);
}

#[test]
fn legacy_grid_matches_original_template_offsets() {
    let cfg = resolve("fullybooked24", 25).unwrap();
    assert_eq!(cfg.grid.cell_origin(0, 0), Point::new(130.0, 332.0));
    assert_eq!(cfg.grid.cell_origin(2, 2), Point::new(870.0, 1132.0));
    let stars = cfg.stars.unwrap();
    assert_eq!(stars.pitch_vec(), Vec2::new(0.0, 60.5));
    assert_eq!(cfg.grid.cell_origin(0, 0) + stars.offset, Point::new(80.0, 342.0));
}

#[test]
fn title_row_one_uses_its_own_offset() {
    let title = resolve("fullybooked25", 25).unwrap().title.unwrap();
    assert_eq!(title.offset_for_row(0), title.offset_y);
    assert_eq!(title.offset_for_row(1), title.offset_y_row1);
    assert_eq!(title.offset_for_row(4), title.offset_y);
    assert_ne!(title.offset_y, title.offset_y_row1);
}

#[test]
fn labelled_families_have_a_default_for_every_cell() {
    for family in BoardConfigRegistry::builtin().families() {
        let Some(label) = family.label else { continue };
        for idx in 0..GRID_CELLS {
            assert!(!label.default_label(idx).is_empty(), "{} #{idx}", family.board_id);
        }
        assert_eq!(label.default_label(GRID_CELLS), "");
    }
}
