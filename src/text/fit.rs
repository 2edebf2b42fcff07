//! Largest-font search under ink box and ink area constraints.

use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::CalResult;
use crate::text::measure::{TextExtent, TextMeasure};

/// Smallest size the fitter will return when a font is available.
pub const MIN_FONT_PX: u32 = 4;

/// Where a label's glyphs come from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GlyphSource {
    /// A font file.
    Font(Arc<Path>),
    /// The builtin dot glyphs; sizes are fixed rather than fitted.
    Builtin,
}

/// A resolved text style for one label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontSpec {
    /// Glyph source.
    pub source: GlyphSource,
    /// Nominal font size in pixels.
    pub size_px: u32,
    /// Outline stroke width in pixels; `0` for plain fill.
    pub stroke_px: u32,
}

impl FontSpec {
    /// Spec with no outline.
    pub fn new(source: GlyphSource, size_px: u32) -> Self {
        Self {
            source,
            size_px,
            stroke_px: 0,
        }
    }

    /// Same spec with an outline stroke.
    pub fn with_stroke(mut self, stroke_px: u32) -> Self {
        self.stroke_px = stroke_px;
        self
    }

    /// `true` for the builtin glyph fallback.
    pub fn is_builtin(&self) -> bool {
        matches!(self.source, GlyphSource::Builtin)
    }
}

/// Bounds a fitted label must stay within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitConstraints {
    /// Maximum ink width in pixels.
    pub max_width: u32,
    /// Maximum ink height in pixels.
    pub max_height: u32,
    /// Maximum ink area in square pixels.
    pub target_area: f64,
}

impl FitConstraints {
    /// Whether `extent` satisfies all three bounds.
    pub fn admits(&self, extent: &TextExtent) -> bool {
        extent.width() <= f64::from(self.max_width)
            && extent.height() <= f64::from(self.max_height)
            && extent.area() <= self.target_area
    }
}

/// Binary search for the largest font size whose ink stays inside [`FitConstraints`].
///
/// Assumes ink extents grow with size. When the glyph source is builtin, no search happens and
/// the measurer's default size is returned.
#[derive(Clone, Copy, Debug)]
pub struct FontFitter {
    min_size_px: u32,
}

impl Default for FontFitter {
    fn default() -> Self {
        Self {
            min_size_px: MIN_FONT_PX,
        }
    }
}

impl FontFitter {
    /// Fitter with the standard lower bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest admitted size for `text`, or the lower bound when nothing fits.
    #[tracing::instrument(level = "trace", skip(self, measure))]
    pub fn fit(
        &self,
        measure: &mut dyn TextMeasure,
        text: &str,
        constraints: &FitConstraints,
    ) -> CalResult<FontSpec> {
        let source = measure.glyph_source();
        if matches!(source, GlyphSource::Builtin) {
            return Ok(FontSpec::new(source, measure.default_size_px()));
        }

        let mut lo = self.min_size_px;
        let mut hi = constraints.max_height.max(8).max(lo);
        let mut best = self.min_size_px;
        while lo <= hi {
            let mid = lo + (hi - lo) / 2;
            let extent = measure.measure(text, mid)?;
            if constraints.admits(&extent) {
                best = mid;
                lo = mid + 1;
            } else if mid == 0 {
                break;
            } else {
                hi = mid - 1;
            }
        }
        Ok(FontSpec::new(source, best))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
