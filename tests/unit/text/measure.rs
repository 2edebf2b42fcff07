use super::*;

use crate::text::font::test_font;

#[test]
fn builtin_extent_matches_dot_grid() {
    let mut m = BuiltinMeasurer::new(1);
    let e = m.measure("12", 10).unwrap();
    assert_eq!(e.y0, -7.0);
    assert_eq!(e.y1, 0.0);
    assert_eq!(e.height(), 7.0);
    // "1" starts one dot in; "2" ends on its fifth column.
    assert_eq!(e.x0, 1.0);
    assert_eq!(e.x1, 11.0);
}

#[test]
fn builtin_default_size_scales_with_canvas() {
    assert_eq!(BuiltinMeasurer::new(1).default_size_px(), builtin::BUILTIN_FONT_PX);
    assert_eq!(BuiltinMeasurer::new(4).default_size_px(), builtin::BUILTIN_FONT_PX * 4);
    assert_eq!(BuiltinMeasurer::new(3).glyph_source(), GlyphSource::Builtin);
}

#[test]
fn empty_text_measures_empty() {
    let mut m = BuiltinMeasurer::default();
    assert!(m.measure("", 10).unwrap().is_empty());
    assert!(m.measure(" ", 10).unwrap().is_empty());
}

#[test]
fn inflate_grows_every_side() {
    let e = TextExtent {
        x0: 1.0,
        y0: -10.0,
        x1: 5.0,
        y1: 0.0,
    };
    let g = e.inflate(2.0);
    assert_eq!(g.width(), 8.0);
    assert_eq!(g.height(), 14.0);
    assert!(TextExtent::default().inflate(3.0).is_empty());
}

#[test]
fn ink_extent_grows_with_size() {
    let font = test_font();
    let mut m = InkMeasurer::new(&font).unwrap();
    let small = m.measure("28", 12).unwrap();
    let large = m.measure("28", 48).unwrap();
    assert!(!small.is_empty());
    assert!(large.width() > small.width());
    assert!(large.height() > small.height());
    // Digits stand on the baseline.
    assert!(large.y0 < 0.0);
    assert!(large.y1 <= 2.0);
    assert_eq!(m.measure("28", 48).unwrap(), large);
}
