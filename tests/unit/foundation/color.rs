use super::*;

#[test]
fn argb_hex_splits_alpha_from_rgb() {
    let c = parse_argb_hex("FF2E5AA2").unwrap();
    assert_eq!(c, Rgba8::rgba(0x2E, 0x5A, 0xA2, 0xFF));
    assert_eq!(argb_hex_to_rgb("FFE8F4FF").unwrap(), [0xE8, 0xF4, 0xFF]);
}

#[test]
fn six_digit_hex_is_opaque() {
    let c = parse_argb_hex("#e8f4ff").unwrap();
    assert_eq!(c, Rgba8::rgb(0xE8, 0xF4, 0xFF));
    assert_eq!(c.a, 255);
}

#[test]
fn argb_hex_formats_back_to_the_same_string() {
    let c = parse_argb_hex("802E5AA2").unwrap();
    assert_eq!(c.to_argb_hex(), "802E5AA2");
    assert_eq!(c.to_svg_rgb(), "rgb(46, 90, 162)");
}

#[test]
fn malformed_hex_is_rejected() {
    assert!(parse_argb_hex("FFF").is_err());
    assert!(parse_argb_hex("GG2E5AA2").is_err());
    assert!(parse_argb_hex("周一周一").is_err());
}

#[test]
fn deserializes_hex_and_component_arrays() {
    let c: Rgba8 = serde_json::from_value(serde_json::json!("FFFFFFFF")).unwrap();
    assert_eq!(c, Rgba8::WHITE);

    let c: Rgba8 = serde_json::from_value(serde_json::json!([0, 0, 0])).unwrap();
    assert_eq!(c, Rgba8::BLACK);

    let c: Rgba8 = serde_json::from_value(serde_json::json!([255, 255, 255, 128])).unwrap();
    assert_eq!(c.a, 128);

    assert!(serde_json::from_value::<Rgba8>(serde_json::json!([1, 2])).is_err());
}

#[test]
fn premultiplies_with_rounding() {
    assert_eq!(Rgba8::rgba(255, 128, 0, 128).to_premul(), [128, 64, 0, 128]);
    assert_eq!(Rgba8::BLACK.to_premul(), [0, 0, 0, 255]);
}
