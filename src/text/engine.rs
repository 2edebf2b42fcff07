use crate::foundation::error::{CalError, CalResult};
use crate::text::font::ResolvedFont;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

/// One shaped line of plain text, ready to hand to a glyph rasterizer.
#[derive(Clone, Debug, Default)]
pub(crate) struct ShapedLine {
    /// Glyphs with positions relative to the pen origin on the baseline.
    pub(crate) glyphs: Vec<vello_cpu::Glyph>,
    /// Font size the run was shaped at.
    pub(crate) font_size: f32,
    /// Total advance.
    pub(crate) advance: f32,
    /// Ascent of the line above the baseline.
    pub(crate) ascent: f32,
    /// Descent of the line below the baseline.
    pub(crate) descent: f32,
}

/// Stateful helper for shaping single-line labels with Parley.
///
/// The font file is registered once per engine; engines are per worker and never shared.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    /// Register `font` in fresh Parley contexts. The font bytes are shared, not copied.
    pub(crate) fn new(font: &ResolvedFont) -> CalResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let shared: std::sync::Arc<dyn AsRef<[u8]> + Send + Sync> = font.bytes.clone();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::new(shared.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CalError::font_unavailable(format!(
                "no font families registered from '{}'",
                font.path.display()
            ))
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CalError::font_unavailable("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::new(shared), 0);

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: data,
        })
    }

    /// Family name Parley reported for the registered file.
    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Font handle for `vello_cpu` glyph runs.
    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` on one line at `size_px`.
    pub(crate) fn shape_line(&mut self, text: &str, size_px: f32) -> CalResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CalError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let mut out = ShapedLine {
            font_size: size_px,
            advance: layout.width(),
            ..ShapedLine::default()
        };
        let Some(line) = layout.lines().next() else {
            return Ok(out);
        };
        let metrics = line.metrics();
        out.ascent = metrics.ascent;
        out.descent = metrics.descent;
        let baseline = metrics.baseline;

        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            out.font_size = run.run().font_size();
            out.glyphs
                .extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                }));
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
