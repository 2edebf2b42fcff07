use super::*;

#[test]
fn row_height_points_map_to_96_dpi_pixels() {
    assert_eq!(points_to_pixels(120.0), 160);
    assert_eq!(points_to_pixels(72.0), 96);
    assert_eq!(points_to_pixels(0.0), 0);
    assert!((pixels_to_points(160) - 120.0).abs() < 1e-9);
}

#[test]
fn millimeters_convert_through_inches() {
    assert_eq!(mm_to_pixels(25.4), 96);
    assert!((mm_to_points(25.4) - 72.0).abs() < 1e-9);
    assert_eq!(mm_to_pixels(4.0), 15);
}

#[test]
fn column_width_uses_narrow_and_wide_heuristics() {
    assert_eq!(column_width_to_pixels(22.0), 159);
    assert_eq!(column_width_to_pixels(1.0), 12);
    assert_eq!(column_width_to_pixels(0.5), 6);
    assert_eq!(column_width_to_pixels(2.0), 19);
}

#[test]
fn non_positive_and_non_finite_inputs_map_to_zero() {
    assert_eq!(column_width_to_pixels(0.0), 0);
    assert_eq!(column_width_to_pixels(-3.0), 0);
    assert_eq!(points_to_pixels(-10.0), 0);
    assert_eq!(mm_to_pixels(f64::NAN), 0);
    assert_eq!(mm_to_points(-1.0), 0.0);
}

#[test]
fn half_pixel_rounds_up() {
    // 0.375 pt * 4/3 = 0.5 px
    assert_eq!(points_to_pixels(0.375), 1);
    // 1.5 * 7 + 5 = 15.5 px
    assert_eq!(column_width_to_pixels(1.5), 16);
}

#[test]
fn column_width_inverse_recovers_configured_units() {
    assert!((pixels_to_column_width(159) - 22.0).abs() < 1e-9);
    assert!((pixels_to_column_width(6) - 0.5).abs() < 1e-9);
    assert!((pixels_to_column_width(20) - 2.14).abs() < 1e-9);
}
