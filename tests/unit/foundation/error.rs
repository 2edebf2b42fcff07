use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CalError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CalError::invalid_request("x")
            .to_string()
            .contains("invalid cell request:")
    );
    assert!(
        CalError::font_unavailable("x")
            .to_string()
            .contains("font unavailable:")
    );
    assert!(
        CalError::vector("x")
            .to_string()
            .contains("vector render error:")
    );
    assert!(
        CalError::raster("x")
            .to_string()
            .contains("raster render error:")
    );
    assert!(
        CalError::composition("x")
            .to_string()
            .contains("composition error:")
    );
    assert!(
        CalError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CalError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
