//! Ink measurement.
//!
//! Every placement decision in a cell is made from the tight bounding box of the pixels a
//! label actually covers, not from font metrics. Extents are expressed relative to the pen
//! origin on the baseline, so `y0` is negative for glyphs standing on the baseline.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{CalError, CalResult};
use crate::text::builtin;
use crate::text::engine::{ShapedLine, TextLayoutEngine};
use crate::text::fit::GlyphSource;
use crate::text::font::ResolvedFont;

/// Tight ink bounding box, relative to the pen origin on the baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    /// Left edge.
    pub x0: f64,
    /// Top edge.
    pub y0: f64,
    /// Right edge (exclusive).
    pub x1: f64,
    /// Bottom edge (exclusive).
    pub y1: f64,
}

impl TextExtent {
    /// Ink width.
    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).max(0.0)
    }

    /// Ink height.
    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).max(0.0)
    }

    /// Ink area.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// `true` when nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Grow by `d` on every side, e.g. for an outline stroke.
    pub fn inflate(&self, d: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            x0: self.x0 - d,
            y0: self.y0 - d,
            x1: self.x1 + d,
            y1: self.y1 + d,
        }
    }
}

/// Measuring oracle behind font fitting and label placement.
pub trait TextMeasure {
    /// Which glyphs this measurer describes.
    fn glyph_source(&self) -> GlyphSource;

    /// Size used when fitting is not possible (builtin glyphs).
    fn default_size_px(&self) -> u32;

    /// Ink extent of `text` at `size_px`.
    fn measure(&mut self, text: &str, size_px: u32) -> CalResult<TextExtent>;
}

/// Measures the builtin dot glyphs; exact and allocation-light.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinMeasurer {
    scale: u32,
}

impl BuiltinMeasurer {
    /// Measurer for a canvas drawn at `scale` times the output size.
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }
}

impl Default for BuiltinMeasurer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TextMeasure for BuiltinMeasurer {
    fn glyph_source(&self) -> GlyphSource {
        GlyphSource::Builtin
    }

    fn default_size_px(&self) -> u32 {
        builtin::BUILTIN_FONT_PX * self.scale
    }

    fn measure(&mut self, text: &str, size_px: u32) -> CalResult<TextExtent> {
        Ok(builtin::ink_rects(text, size_px)
            .into_iter()
            .fold(None::<TextExtent>, |acc, r| {
                Some(match acc {
                    None => TextExtent {
                        x0: r.x0,
                        y0: r.y0,
                        x1: r.x1,
                        y1: r.y1,
                    },
                    Some(e) => TextExtent {
                        x0: e.x0.min(r.x0),
                        y0: e.y0.min(r.y0),
                        x1: e.x1.max(r.x1),
                        y1: e.y1.max(r.y1),
                    },
                })
            })
            .unwrap_or_default())
    }
}

/// Measures shaped text by rasterizing it and scanning the coverage.
///
/// Results are memoized per `(text, size)`; one measurer belongs to one worker.
pub struct InkMeasurer {
    engine: TextLayoutEngine,
    path: Arc<Path>,
    cache: HashMap<(String, u32), TextExtent>,
}

impl InkMeasurer {
    /// Register `font` and build a measurer for it.
    pub fn new(font: &ResolvedFont) -> CalResult<Self> {
        Ok(Self {
            engine: TextLayoutEngine::new(font)?,
            path: font.path.clone(),
            cache: HashMap::new(),
        })
    }

    /// Family name of the registered font.
    pub fn family_name(&self) -> &str {
        self.engine.family_name()
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        self.engine.font_data()
    }

    pub(crate) fn shape(&mut self, text: &str, size_px: u32) -> CalResult<ShapedLine> {
        self.engine.shape_line(text, size_px as f32)
    }

    fn scan(&self, shaped: &ShapedLine) -> CalResult<TextExtent> {
        if shaped.glyphs.is_empty() {
            return Ok(TextExtent::default());
        }

        let size = f64::from(shaped.font_size);
        let pad = (size * 0.5).ceil() + 2.0;
        let ascent = f64::from(shaped.ascent).max(size).ceil();
        let descent = f64::from(shaped.descent).max(size * 0.5).ceil();
        let width = f64::from(shaped.advance).ceil() + 2.0 * pad + size.ceil();
        let height = ascent + descent + 2.0 * pad;

        let w: u16 = (width as u32)
            .try_into()
            .map_err(|_| CalError::raster("measurement canvas width exceeds u16"))?;
        let h: u16 = (height as u32)
            .try_into()
            .map_err(|_| CalError::raster("measurement canvas height exceeds u16"))?;

        let origin_x = pad;
        let origin_y = pad + ascent;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin_x, origin_y)));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
        ctx.glyph_run(self.engine.font_data())
            .font_size(shaped.font_size)
            .fill_glyphs(shaped.glyphs.iter().copied());
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        let data = pixmap.data_as_u8_slice();

        let (w, h) = (usize::from(w), usize::from(h));
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0usize;
        let mut max_y = 0usize;
        for y in 0..h {
            let row = &data[y * w * 4..(y + 1) * w * 4];
            for (x, px) in row.chunks_exact(4).enumerate() {
                if px[3] == 0 {
                    continue;
                }
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
        if min_x == usize::MAX {
            return Ok(TextExtent::default());
        }

        Ok(TextExtent {
            x0: min_x as f64 - origin_x,
            y0: min_y as f64 - origin_y,
            x1: (max_x + 1) as f64 - origin_x,
            y1: (max_y + 1) as f64 - origin_y,
        })
    }
}

impl TextMeasure for InkMeasurer {
    fn glyph_source(&self) -> GlyphSource {
        GlyphSource::Font(self.path.clone())
    }

    fn default_size_px(&self) -> u32 {
        builtin::BUILTIN_FONT_PX
    }

    fn measure(&mut self, text: &str, size_px: u32) -> CalResult<TextExtent> {
        if text.is_empty() || size_px == 0 {
            return Ok(TextExtent::default());
        }
        if let Some(e) = self.cache.get(&(text.to_string(), size_px)) {
            return Ok(*e);
        }
        let shaped = self.shape(text, size_px)?;
        let extent = self.scan(&shaped)?;
        self.cache.insert((text.to_string(), size_px), extent);
        Ok(extent)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
