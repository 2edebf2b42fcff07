use super::*;

#[test]
fn defaults_describe_the_printed_calendar() {
    let cfg = CalendarConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.grid.day_cell_width_px(), 159);
    assert_eq!(cfg.grid.day_cell_height_px(), 160);
    assert_eq!(cfg.grid.spacer_height_px(), 40);
    assert_eq!(cfg.colors.weekend_bg.to_argb_hex(), "FFE8F4FF");
    assert_eq!(cfg.render.render_scale, 4);
}

#[test]
fn partial_json_keeps_defaults_for_missing_fields() {
    let json = r#"{
        "grid": { "column_width_units": 4.0 },
        "colors": { "weekend_bg": "FF112233" },
        "labels": { "style": "english" }
    }"#;
    let cfg = CalendarConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.grid.day_cell_width_px(), 33);
    assert_eq!(cfg.grid.day_cell_height_px(), 160);
    assert_eq!(cfg.colors.weekend_bg, Rgba8::rgb(0x11, 0x22, 0x33));
    assert_eq!(cfg.labels.weekday(5), "SAT");
    assert_eq!(cfg.layout, LayoutRatios::default());
}

#[test]
fn unknown_keys_are_rejected() {
    let json = r#"{ "grid": { "colum_width_units": 4.0 } }"#;
    let err = CalendarConfig::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn out_of_range_values_fail_validation() {
    let mut cfg = CalendarConfig::default();
    cfg.render.render_scale = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = CalendarConfig::default();
    cfg.layout.date_area_width = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = CalendarConfig::default();
    cfg.labels.month_names.pop();
    assert!(cfg.validate().is_err());

    let mut cfg = CalendarConfig::default();
    cfg.grid.row_height_points = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn label_lookups_are_total() {
    let labels = LabelConfig::default();
    assert_eq!(labels.weekday(0), "周一");
    assert_eq!(labels.weekday(6), "周日");
    assert_eq!(labels.weekday(7), "");
    assert_eq!(labels.month_name(1), "January");
    assert_eq!(labels.month_name(12), "December");
    assert_eq!(labels.month_name(0), "");
    assert_eq!(labels.month_name(13), "");
}

#[test]
fn output_names_substitute_year_and_pad_dates() {
    let out = OutputConfig::default();
    assert_eq!(out.image_path(2026), PathBuf::from("yearly_calendar_2026.png"));
    assert_eq!(OutputConfig::cell_file_name(2, 9), "day_02_09.png");
}

#[test]
fn font_candidates_follow_resolution_order() {
    let fonts = FontConfig {
        path: Some(PathBuf::from("a.ttf")),
        fallback_paths: vec![PathBuf::from("b.ttf"), PathBuf::from("c.ttf")],
        family_name: None,
    };
    let got: Vec<_> = fonts.candidates().collect();
    assert_eq!(
        got,
        vec![Path::new("a.ttf"), Path::new("b.ttf"), Path::new("c.ttf")]
    );
    assert_eq!(FontConfig::builtin_only().candidates().count(), 0);
}

#[test]
fn only_day_file_names_count_as_cell_exports() {
    assert!(OutputConfig::is_cell_file_name("day_02_09.png"));
    assert!(OutputConfig::is_cell_file_name(&OutputConfig::cell_file_name(12, 31)));
    assert!(!OutputConfig::is_cell_file_name("day_2_9.png"));
    assert!(!OutputConfig::is_cell_file_name("day_02_09.jpg"));
    assert!(!OutputConfig::is_cell_file_name("keep.jpg"));
    assert!(!OutputConfig::is_cell_file_name("day_ab_cd.png"));
    assert!(!OutputConfig::is_cell_file_name("xday_02_09.png"));
}

#[test]
fn oversized_grid_cells_are_rejected() {
    let mut cfg = CalendarConfig::default();
    cfg.grid.row_height_points = 1e9;
    assert!(matches!(cfg.validate(), Err(CalError::Validation(_))));

    let mut cfg = CalendarConfig::default();
    cfg.grid.column_width_units = 1e7;
    assert!(matches!(cfg.validate(), Err(CalError::Validation(_))));

    // 6144 pt is exactly 8192 px, the largest accepted cell.
    let mut cfg = CalendarConfig::default();
    cfg.grid.row_height_points = 6144.0;
    cfg.validate().unwrap();
    cfg.grid.row_height_points = 6145.0;
    assert!(cfg.validate().is_err());
}
