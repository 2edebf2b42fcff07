//! Unit conversions between typographic points, pixels, millimeters and spreadsheet column
//! width units.
//!
//! Everything assumes 96 DPI. Rounding to whole pixels is half-up; negative and non-finite
//! inputs are treated as zero so every function is total.

/// Screen resolution all pixel conversions assume.
pub const DPI: f64 = 96.0;
/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;
/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

fn round_px(v: f64) -> u32 {
    let v = non_negative(v).round();
    if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        v as u32
    }
}

/// `px = round(pt * 96/72)`
pub fn points_to_pixels(points: f64) -> u32 {
    round_px(points * DPI / POINTS_PER_INCH)
}

/// `pt = px * 72/96`
pub fn pixels_to_points(pixels: u32) -> f64 {
    f64::from(pixels) * POINTS_PER_INCH / DPI
}

/// `pt = mm * 72/25.4`
pub fn mm_to_points(mm: f64) -> f64 {
    non_negative(mm) * POINTS_PER_INCH / MM_PER_INCH
}

/// `px = round(mm * 96/25.4)`
pub fn mm_to_pixels(mm: f64) -> u32 {
    round_px(mm * DPI / MM_PER_INCH)
}

/// Approximate pixel width of a spreadsheet column given in character-width units.
///
/// Narrow columns (`width <= 1`) scale linearly at 12 px per unit; wider ones follow the
/// usual `7 px per character + 5 px padding` heuristic.
pub fn column_width_to_pixels(width: f64) -> u32 {
    let width = non_negative(width);
    if width == 0.0 {
        return 0;
    }
    if width <= 1.0 {
        return round_px(width * 12.0);
    }
    round_px(width * 7.0 + 5.0)
}

/// Inverse of [`column_width_to_pixels`], rounded to two decimals.
pub fn pixels_to_column_width(pixels: u32) -> f64 {
    let px = f64::from(pixels);
    let width = if pixels <= 12 {
        px / 12.0
    } else {
        (px - 5.0) / 7.0
    };
    (width * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/units.rs"]
mod tests;
