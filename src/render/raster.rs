use std::sync::Arc;

use crate::cell::plan::{CellPlan, PlacedText};
use crate::cell::request::CellRequest;
use crate::config::CalendarConfig;
use crate::foundation::color::Rgba8;
use crate::foundation::error::{CalError, CalResult};
use crate::render::backend::{BackendKind, CellBackend};
use crate::render::bitmap::CellBitmap;
use crate::text::builtin;
use crate::text::fit::GlyphSource;
use crate::text::font::ResolvedFont;
use crate::text::measure::{BuiltinMeasurer, InkMeasurer, TextExtent, TextMeasure};

enum RasterGlyphs {
    Font(InkMeasurer),
    Builtin(BuiltinMeasurer),
}

impl TextMeasure for RasterGlyphs {
    fn glyph_source(&self) -> GlyphSource {
        match self {
            Self::Font(m) => m.glyph_source(),
            Self::Builtin(m) => m.glyph_source(),
        }
    }

    fn default_size_px(&self) -> u32 {
        match self {
            Self::Font(m) => m.default_size_px(),
            Self::Builtin(m) => m.default_size_px(),
        }
    }

    fn measure(&mut self, text: &str, size_px: u32) -> CalResult<TextExtent> {
        match self {
            Self::Font(m) => m.measure(text, size_px),
            Self::Builtin(m) => m.measure(text, size_px),
        }
    }
}

/// Draws cells with `vello_cpu` at `scale` times the requested size, then resamples down.
pub struct RasterBackend {
    config: Arc<CalendarConfig>,
    glyphs: RasterGlyphs,
    scale: u32,
}

impl RasterBackend {
    /// Backend drawing with `font`, or with the builtin glyphs when `font` is `None` or
    /// cannot be registered.
    pub fn new(config: Arc<CalendarConfig>, font: Option<&ResolvedFont>) -> Self {
        let scale = config.render.render_scale.max(1);
        let glyphs = match font.map(InkMeasurer::new) {
            Some(Ok(m)) => RasterGlyphs::Font(m),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "raster backend cannot use the resolved font; using builtin glyphs");
                RasterGlyphs::Builtin(BuiltinMeasurer::new(scale))
            }
            None => RasterGlyphs::Builtin(BuiltinMeasurer::new(scale)),
        };
        Self {
            config,
            glyphs,
            scale,
        }
    }

    /// Supersampling factor.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn paint(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
    }

    fn draw_text(&mut self, ctx: &mut vello_cpu::RenderContext, t: &PlacedText) -> CalResult<()> {
        Self::paint(ctx, t.color);
        let stroke = t.font.stroke_px;

        if t.font.is_builtin() {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            let grow = f64::from(stroke);
            for r in builtin::ink_rects(&t.text, t.font.size_px) {
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    t.origin.x + r.x0 - grow,
                    t.origin.y + r.y0 - grow,
                    t.origin.x + r.x1 + grow,
                    t.origin.y + r.y1 + grow,
                ));
            }
            return Ok(());
        }

        let RasterGlyphs::Font(measurer) = &mut self.glyphs else {
            return Err(CalError::raster(format!(
                "label {:?} wants a font but the raster backend has none",
                t.text
            )));
        };
        let shaped = measurer.shape(&t.text, t.font.size_px)?;
        if shaped.glyphs.is_empty() {
            return Ok(());
        }

        // Outline: re-draw the fill at every integer offset within the stroke radius.
        let r = i64::from(stroke);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                    t.origin.x + dx as f64,
                    t.origin.y + dy as f64,
                )));
                ctx.glyph_run(measurer.font_data())
                    .font_size(shaped.font_size)
                    .fill_glyphs(shaped.glyphs.iter().copied());
            }
        }
        Ok(())
    }
}

impl CellBackend for RasterBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Raster
    }

    fn render_cell(&mut self, req: &CellRequest) -> CalResult<CellBitmap> {
        req.check_dims()?;
        let big = req.scaled(self.scale)?;
        let w: u16 = big
            .cell_width_px
            .try_into()
            .map_err(|_| CalError::raster("supersampled cell width exceeds u16"))?;
        let h: u16 = big
            .cell_height_px
            .try_into()
            .map_err(|_| CalError::raster("supersampled cell height exceeds u16"))?;

        let config = Arc::clone(&self.config);
        let plan = CellPlan::build(&big, &config, &mut self.glyphs, self.scale)?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        let tri = plan.layout.triangle;
        if tri.width() > 0.0 && tri.height() > 0.0 {
            let mut path = vello_cpu::kurbo::BezPath::new();
            for (i, p) in tri.vertices().iter().enumerate() {
                let p = vello_cpu::kurbo::Point::new(p.x, p.y);
                if i == 0 {
                    path.move_to(p);
                } else {
                    path.line_to(p);
                }
            }
            path.close_path();
            Self::paint(&mut ctx, plan.triangle_color);
            ctx.fill_path(&path);
        }
        for t in &plan.texts {
            self.draw_text(&mut ctx, t)?;
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        let full = CellBitmap::from_premul(
            big.cell_width_px,
            big.cell_height_px,
            pixmap.data_as_u8_slice().to_vec(),
        )?;
        full.downsample(req.cell_width_px, req.cell_height_px)
    }
}
