use super::*;

fn contains(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

#[test]
fn default_cell_geometry() {
    let l = CellLayout::compute(159, 160, &LayoutRatios::default());
    assert_eq!(l.margin, 6.0);
    assert_eq!(l.date_area, Rect::new(88.0, 0.0, 159.0, 72.0));
    assert_eq!(l.date_text_box, Rect::new(88.0, 6.0, 153.0, 72.0));
    assert_eq!((l.date_fit.max_width, l.date_fit.max_height), (65, 66));
    assert!((l.date_fit.target_area - 159.0 * 160.0 * 0.025).abs() < 1e-9);

    assert_eq!(l.triangle.bounds(), Rect::new(88.0, 104.0, 159.0, 160.0));
    assert_eq!(l.weekday_anchor, Point::new(138.0, 139.0));
    assert_eq!((l.weekday_fit.max_width, l.weekday_fit.max_height), (33, 24));
    assert!((l.weekday_fit.target_area - 159.0 * 160.0 * 0.01875).abs() < 1e-9);

    assert_eq!((l.month_font_px, l.english_font_px), (33, 12));
    assert_eq!(l.english_offset, 34.0);
}

#[test]
fn right_angle_sits_at_bottom_right() {
    let l = CellLayout::compute(200, 100, &LayoutRatios::default());
    let [corner, a, b] = l.triangle.vertices();
    assert_eq!(corner, Point::new(200.0, 100.0));
    assert_eq!(a.y, corner.y);
    assert_eq!(b.x, corner.x);
}

#[test]
fn every_region_is_inside_the_cell() {
    let ratios = LayoutRatios::default();
    for w in [1u32, 2, 7, 33, 64, 159, 400, 1021] {
        for h in [1u32, 3, 9, 32, 160, 333, 900] {
            let l = CellLayout::compute(w, h, &ratios);
            for r in l.regions() {
                assert!(contains(l.bounds(), r), "{w}x{h}: {r:?}");
            }
            assert!(contains(
                l.triangle.bounds(),
                Rect::from_points(l.weekday_anchor, l.weekday_anchor)
            ));
            assert!(l.date_fit.max_width >= 1 && l.weekday_fit.max_height >= 1);
        }
    }
}

#[test]
fn triangle_margin_pulls_the_triangle_in() {
    let ratios = LayoutRatios {
        triangle_margin: 0.1,
        ..LayoutRatios::default()
    };
    let l = CellLayout::compute(100, 100, &ratios);
    assert_eq!((l.triangle.right, l.triangle.bottom), (90.0, 90.0));
}
