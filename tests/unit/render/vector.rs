use super::*;

use crate::text::measure::BuiltinMeasurer;

fn plan(month: u32, day: u32) -> CellPlan {
    let cfg = CalendarConfig::default();
    let req = CellRequest::new(month, day, "SAT", 159, 160, true).unwrap();
    CellPlan::build(&req, &cfg, &mut BuiltinMeasurer::new(1), 1).unwrap()
}

#[test]
fn xml_special_characters_are_escaped() {
    assert_eq!(escape_xml(r#"<a & "b">'"#), "&lt;a &amp; &quot;b&quot;&gt;&apos;");
    assert_eq!(escape_xml("周六"), "周六");
}

#[test]
fn scene_has_exact_viewport_and_right_angle_triangle() {
    let svg = cell_scene_svg(&plan(4, 12), "Test Sans");
    assert!(svg.contains(r#"width="159" height="160" viewBox="0 0 159 160""#));
    assert!(svg.contains(r#"points="159,160 88,160 159,104""#));
    assert!(svg.contains(r#"fill="rgb(0, 0, 0)""#));
}

#[test]
fn translucent_colors_emit_opacity() {
    assert_eq!(
        paint_attrs("fill", Rgba8::rgba(1, 2, 3, 51)),
        r#"fill="rgb(1, 2, 3)" fill-opacity="0.2000""#
    );
    assert_eq!(paint_attrs("stroke", Rgba8::WHITE), r#"stroke="rgb(255, 255, 255)""#);
}

#[test]
fn builtin_labels_become_rects() {
    let svg = cell_scene_svg(&plan(4, 1), "Test Sans");
    assert!(!svg.contains("<text"));
    assert!(svg.matches("<rect").count() > 10);
}

#[test]
fn scene_without_text_rasterizes_at_exact_size() {
    let mut p = plan(4, 12);
    p.texts.clear();
    let svg = cell_scene_svg(&p, "Test Sans");
    let db = Arc::new(usvg::fontdb::Database::new());
    let data = rasterize_svg_to_premul_rgba8(&svg, &db, "Test Sans", 159, 160).unwrap();
    assert_eq!(data.len(), 159 * 160 * 4);

    let b = CellBitmap::from_premul(159, 160, data).unwrap();
    // Deep inside the triangle: opaque black. Top-left: untouched.
    assert_eq!(b.pixel(155, 156), Some([0, 0, 0, 255]));
    assert_eq!(b.pixel(2, 2), Some([0, 0, 0, 0]));
}

#[test]
fn malformed_scene_is_a_vector_error() {
    let db = Arc::new(usvg::fontdb::Database::new());
    let err = rasterize_svg_to_premul_rgba8("<svg", &db, "x", 10, 10).unwrap_err();
    assert!(matches!(err, CalError::VectorRender(_)));
}
