use kurbo::{Point, Rect};

use crate::cell::layout::CellLayout;
use crate::cell::request::CellRequest;
use crate::config::CalendarConfig;
use crate::foundation::color::Rgba8;
use crate::foundation::error::CalResult;
use crate::text::fit::{FontFitter, FontSpec};
use crate::text::measure::{TextExtent, TextMeasure};

/// What a placed label shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelRole {
    /// Day of month, top-right.
    Date,
    /// Two-digit month number, top-left on the first day.
    MonthNumber,
    /// English month name under the month number.
    MonthName,
    /// Weekday label over the triangle.
    Weekday,
}

/// A label with its resolved font and pen position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    /// Label kind.
    pub role: LabelRole,
    /// Text content.
    pub text: String,
    /// Resolved font.
    pub font: FontSpec,
    /// Measured ink box of the fill, relative to `origin`.
    pub extent: TextExtent,
    /// Pen origin on the baseline.
    pub origin: Point,
    /// Fill and stroke color.
    pub color: Rgba8,
}

impl PlacedText {
    /// Ink box in cell coordinates, including the outline stroke.
    pub fn ink_rect(&self) -> Rect {
        let e = self.extent.inflate(f64::from(self.font.stroke_px));
        Rect::new(
            self.origin.x + e.x0,
            self.origin.y + e.y0,
            self.origin.x + e.x1,
            self.origin.y + e.y1,
        )
    }
}

/// Everything a backend needs to draw one cell: geometry plus fitted, placed labels.
///
/// The triangle is drawn first, then `texts` in order.
#[derive(Clone, Debug, PartialEq)]
pub struct CellPlan {
    /// Geometry at the drawing resolution.
    pub layout: CellLayout,
    /// Triangle fill.
    pub triangle_color: Rgba8,
    /// Labels in draw order.
    pub texts: Vec<PlacedText>,
}

impl CellPlan {
    /// Lay out `req` and fit its labels with `measure`.
    ///
    /// `scale` multiplies stroke widths when `req` was already scaled up for supersampling.
    #[tracing::instrument(level = "trace", skip_all, fields(month = req.month, day = req.day))]
    pub fn build(
        req: &CellRequest,
        config: &CalendarConfig,
        measure: &mut dyn TextMeasure,
        scale: u32,
    ) -> CalResult<Self> {
        let layout = CellLayout::compute(req.cell_width_px, req.cell_height_px, &config.layout);
        let colors = &config.colors;
        let mut plan = Self {
            layout,
            triangle_color: colors.triangle,
            texts: Vec::new(),
        };

        if !req.has_valid_labels() {
            tracing::debug!(
                month = req.month,
                day = req.day,
                "invalid cell request; drawing placeholder without labels"
            );
            return Ok(plan);
        }

        let fitter = FontFitter::new();
        let scale = scale.max(1);

        let date = req.day.to_string();
        let spec = fitter.fit(measure, &date, &layout.date_fit)?;
        let extent = measure.measure(&date, spec.size_px)?;
        if !extent.is_empty() {
            let c = layout.date_text_box.center();
            let left = (c.x - extent.width() / 2.0).round();
            let top = (c.y - extent.height() / 2.0).round();
            plan.texts.push(PlacedText {
                role: LabelRole::Date,
                text: date,
                font: spec,
                extent,
                origin: Point::new(left - extent.x0, top - extent.y0),
                color: colors.date_text,
            });
        }

        if req.is_month_start() && layout.month_font_px > 0 {
            let banner = [
                (
                    LabelRole::MonthNumber,
                    format!("{:02}", req.month),
                    layout.month_font_px,
                    config.layout.month_label_stroke,
                    0.0,
                ),
                (
                    LabelRole::MonthName,
                    config.labels.month_name(req.month).to_string(),
                    layout.english_font_px,
                    config.layout.month_label_english_stroke,
                    layout.english_offset,
                ),
            ];
            for (role, text, size_px, stroke, dy) in banner {
                if text.is_empty() {
                    continue;
                }
                let spec = FontSpec::new(measure.glyph_source(), size_px)
                    .with_stroke(stroke.saturating_mul(scale));
                let extent = measure.measure(&text, size_px)?;
                if extent.is_empty() {
                    continue;
                }
                let outer = extent.inflate(f64::from(spec.stroke_px));
                let top = layout.margin + dy;
                plan.texts.push(PlacedText {
                    role,
                    text,
                    font: spec,
                    extent,
                    origin: Point::new(layout.margin - outer.x0, top - outer.y0),
                    color: colors.date_text,
                });
            }
        }

        let weekday = req.weekday_label.trim().to_string();
        let spec = fitter.fit(measure, &weekday, &layout.weekday_fit)?;
        let extent = measure.measure(&weekday, spec.size_px)?;
        if !extent.is_empty() {
            let a = layout.weekday_anchor;
            let left = a.x - (extent.width() / 2.0).floor();
            let top = a.y - (extent.height() / 2.0).floor();
            plan.texts.push(PlacedText {
                role: LabelRole::Weekday,
                text: weekday,
                font: spec,
                extent,
                origin: Point::new(left - extent.x0, top - extent.y0),
                color: colors.weekday_text,
            });
        }

        Ok(plan)
    }

    /// Label of a given role, if placed.
    pub fn text(&self, role: LabelRole) -> Option<&PlacedText> {
        self.texts.iter().find(|t| t.role == role)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cell/plan.rs"]
mod tests;
