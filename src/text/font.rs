use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::FontConfig;
use crate::foundation::error::{CalError, CalResult};

/// A font file picked from the configured candidates, loaded once and shared read-only.
#[derive(Clone, Debug)]
pub struct ResolvedFont {
    /// Where the bytes came from.
    pub path: Arc<Path>,
    /// Raw font file (TTF, OTF or a TTC collection).
    pub bytes: Arc<Vec<u8>>,
}

/// Return the first candidate that exists and is readable, in configured order.
///
/// `None` means the renderer runs on the builtin glyph set.
pub fn resolve_font(fonts: &FontConfig) -> Option<ResolvedFont> {
    for path in fonts.candidates() {
        match load_font_file(path) {
            Ok(font) => {
                tracing::debug!(path = %path.display(), "resolved font");
                return Some(font);
            }
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "skipping font candidate"),
        }
    }
    None
}

/// Read one font file.
pub fn load_font_file(path: &Path) -> CalResult<ResolvedFont> {
    if !path.is_file() {
        return Err(CalError::font_unavailable(format!(
            "'{}' is not a file",
            path.display()
        )));
    }
    let bytes = std::fs::read(path).map_err(|e| {
        CalError::font_unavailable(format!("read '{}': {e}", path.display()))
    })?;
    if bytes.is_empty() {
        return Err(CalError::font_unavailable(format!(
            "'{}' is empty",
            path.display()
        )));
    }
    Ok(ResolvedFont {
        path: Arc::from(PathBuf::from(path).into_boxed_path()),
        bytes: Arc::new(bytes),
    })
}

#[cfg(test)]
pub(crate) fn test_font() -> ResolvedFont {
    let path = Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/fonts/DejaVuSans.ttf"
    ));
    load_font_file(path).expect("vendored test font")
}
