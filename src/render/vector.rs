use std::fmt::Write as _;
use std::sync::Arc;

use crate::cell::plan::{CellPlan, PlacedText};
use crate::cell::request::CellRequest;
use crate::config::CalendarConfig;
use crate::foundation::color::Rgba8;
use crate::foundation::error::{CalError, CalResult};
use crate::render::backend::{BackendKind, CellBackend};
use crate::render::bitmap::CellBitmap;
use crate::text::builtin;
use crate::text::font::ResolvedFont;
use crate::text::measure::InkMeasurer;

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn paint_attrs(attr: &str, c: Rgba8) -> String {
    if c.a == 255 {
        format!("{attr}=\"{}\"", c.to_svg_rgb())
    } else {
        format!(
            "{attr}=\"{}\" {attr}-opacity=\"{:.4}\"",
            c.to_svg_rgb(),
            c.svg_opacity()
        )
    }
}

/// Build the SVG scene of one cell.
///
/// Labels are positioned by their pen origin on the alphabetic baseline, so the scene lands on
/// the same pixels the ink measurement predicted.
pub fn cell_scene_svg(plan: &CellPlan, family: &str) -> String {
    let w = plan.layout.width;
    let h = plan.layout.height;
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );

    let tri = plan.layout.triangle;
    if tri.width() > 0.0 && tri.height() > 0.0 {
        let points = tri
            .vertices()
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            svg,
            r#"  <polygon points="{points}" {} shape-rendering="geometricPrecision"/>"#,
            paint_attrs("fill", plan.triangle_color)
        );
    }

    for t in &plan.texts {
        push_text(&mut svg, t, family);
    }
    svg.push_str("</svg>\n");
    svg
}

fn push_text(svg: &mut String, t: &PlacedText, family: &str) {
    let stroke = t.font.stroke_px;
    if t.font.is_builtin() {
        let grow = f64::from(stroke);
        for r in builtin::ink_rects(&t.text, t.font.size_px) {
            let _ = writeln!(
                svg,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
                t.origin.x + r.x0 - grow,
                t.origin.y + r.y0 - grow,
                r.width() + 2.0 * grow,
                r.height() + 2.0 * grow,
                paint_attrs("fill", t.color)
            );
        }
        return;
    }

    let stroke_attrs = if stroke > 0 {
        format!(
            r#" {} stroke-width="{}" stroke-linejoin="round""#,
            paint_attrs("stroke", t.color),
            2 * stroke
        )
    } else {
        String::new()
    };
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="{}" font-family="'{}'" font-size="{}" {}{stroke_attrs}>{}</text>"#,
        t.origin.x,
        t.origin.y,
        escape_xml(family),
        t.font.size_px,
        paint_attrs("fill", t.color),
        escape_xml(&t.text)
    );
}

/// Rasterize an SVG scene at exactly `width x height` into premultiplied RGBA8.
pub fn rasterize_svg_to_premul_rgba8(
    svg: &str,
    fontdb: &Arc<usvg::fontdb::Database>,
    family: &str,
    width: u32,
    height: u32,
) -> CalResult<Vec<u8>> {
    let mut opts = usvg::Options::default();
    opts.font_family = family.to_string();
    opts.fontdb = Arc::clone(fontdb);

    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| CalError::vector(format!("parse cell scene: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| CalError::vector("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

/// Emits an SVG scene per cell and rasterizes it with `resvg` at the exact size.
pub struct VectorBackend {
    config: Arc<CalendarConfig>,
    fontdb: Arc<usvg::fontdb::Database>,
    family: String,
    measurer: InkMeasurer,
}

impl VectorBackend {
    /// Backend sharing `fontdb`; `family` must name a face loaded in it.
    pub fn new(
        config: Arc<CalendarConfig>,
        font: &ResolvedFont,
        fontdb: Arc<usvg::fontdb::Database>,
        family: impl Into<String>,
    ) -> CalResult<Self> {
        let measurer = InkMeasurer::new(font).map_err(|e| CalError::vector(e.to_string()))?;
        Ok(Self {
            config,
            fontdb,
            family: family.into(),
            measurer,
        })
    }

    /// Family name written into every `<text>` element.
    pub fn family(&self) -> &str {
        &self.family
    }
}

impl CellBackend for VectorBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Vector
    }

    fn render_cell(&mut self, req: &CellRequest) -> CalResult<CellBitmap> {
        req.check_dims()?;
        let config = Arc::clone(&self.config);
        let plan = CellPlan::build(req, &config, &mut self.measurer, 1)?;
        let svg = cell_scene_svg(&plan, &self.family);
        let data = rasterize_svg_to_premul_rgba8(
            &svg,
            &self.fontdb,
            &self.family,
            req.cell_width_px,
            req.cell_height_px,
        )?;
        CellBitmap::from_premul(req.cell_width_px, req.cell_height_px, data)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/vector.rs"]
mod tests;
