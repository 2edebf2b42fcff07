use super::*;

use crate::config::{CalendarConfig, FontConfig};

fn small_env(parallel: bool) -> RenderEnv {
    let mut cfg = CalendarConfig {
        fonts: FontConfig::builtin_only(),
        ..CalendarConfig::default()
    };
    cfg.grid.column_width_units = 10.0;
    cfg.grid.row_height_points = 60.0;
    cfg.render.render_scale = 1;
    cfg.render.parallel = parallel;
    cfg.render.threads = Some(2);
    RenderEnv::new(cfg).unwrap()
}

#[test]
fn default_geometry_matches_printed_layout() {
    let g = GridGeometry::from_config(&GridConfig::default());
    assert_eq!((g.cell_width, g.cell_height, g.spacer_height), (159, 160, 40));
    assert_eq!(g.rows.len(), 23);
    assert_eq!(g.width(), 31 * 159);
    assert_eq!(g.height(), 12 * 160 + 11 * 40);
    assert_eq!((g.width(), g.height()), (4929, 2360));
}

#[test]
fn rows_alternate_month_and_spacer() {
    let g = GridGeometry::from_config(&GridConfig::default());
    for (i, row) in g.rows.iter().enumerate() {
        if i % 2 == 0 {
            assert_eq!(row.kind, RowKind::Month(i as u32 / 2 + 1));
            assert_eq!(row.height, 160);
        } else {
            assert_eq!(row.kind, RowKind::Spacer);
            assert_eq!(row.height, 40);
        }
    }
    assert_eq!(g.month_y(1), Some(0));
    assert_eq!(g.month_y(2), Some(200));
    assert_eq!(g.month_y(12), Some(11 * 200));
    assert_eq!(g.cell_origin(2, 29), Some((28 * 159, 200)));
    assert_eq!(g.cell_origin(2, 32), None);
    assert_eq!(g.cell_origin(13, 1), None);
}

#[test]
fn stroke_rect_draws_inside_the_cell() {
    let mut img = RgbImage::from_pixel(6, 5, Rgb([255, 255, 255]));
    stroke_rect(&mut img, 1, 1, 4, 3, Rgba8::BLACK);
    assert_eq!(img.get_pixel(1, 1).0, [0, 0, 0]);
    assert_eq!(img.get_pixel(4, 3).0, [0, 0, 0]);
    assert_eq!(img.get_pixel(2, 2).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(5, 4).0, [255, 255, 255]);
}

#[test]
fn paste_blends_premultiplied_over_background() {
    let mut img = RgbImage::from_pixel(2, 1, Rgb([200, 100, 0]));
    let cell = CellBitmap::from_premul(2, 1, vec![0, 0, 0, 0, 128, 0, 0, 128]).unwrap();
    paste_premul(&mut img, &cell, 0, 0);
    assert_eq!(img.get_pixel(0, 0).0, [200, 100, 0]);
    assert_eq!(img.get_pixel(1, 0).0, [128 + 100, 50, 0]);
}

#[test]
fn stats_count_outcome_kinds() {
    let ok = CellBitmap::from_premul(1, 1, vec![0; 4]).unwrap();
    let mut s = ComposeStats::default();
    s.record(&RenderOutcome::Rendered(ok.clone()));
    s.record(&RenderOutcome::FallbackUsed {
        bitmap: ok,
        used: crate::render::backend::BackendKind::Raster,
        failures: vec![],
    });
    s.record(&RenderOutcome::Failed(CalError::vector("x")));
    assert_eq!((s.cells, s.fallbacks, s.failures), (3, 1, 1));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert!(build_thread_pool(Some(1)).is_ok());
}

#[test]
fn mismatched_outcome_count_is_a_composition_error() {
    let env = small_env(false);
    let cal = YearCalendar::generate(2025, &env.config().labels).unwrap();
    let err = GridComposer::new(&env).compose_rendered(&cal, &[]).unwrap_err();
    assert!(matches!(err, CalError::Composition(_)));
}

#[test]
fn composed_canvas_has_grid_size_and_counts() {
    let env = small_env(false);
    let (img, stats) = compose_year(&env, 2025).unwrap();
    let g = GridGeometry::from_config(&env.config().grid);
    assert_eq!((g.cell_width, g.cell_height, g.spacer_height), (75, 80, 20));
    assert_eq!((img.width(), img.height()), (g.width(), g.height()));
    assert_eq!(stats.cells, 365);
    assert_eq!(stats.blank_cells, 12 * 31 - 365);
    assert_eq!((stats.fallbacks, stats.failures), (0, 0));
}

#[test]
fn huge_grid_geometry_saturates_instead_of_overflowing() {
    let grid = GridConfig {
        column_width_units: 1e12,
        row_height_points: 1e12,
        spacer_height_ratio: 4.0,
    };
    let g = GridGeometry::from_config(&grid);
    assert_eq!(g.rows.len(), 23);
    assert_eq!(g.width(), u32::MAX);
    assert_eq!(g.height(), u32::MAX);
    assert_eq!(g.cell_origin(1, 31), None);
}
