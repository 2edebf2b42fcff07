//! Ratio-driven geometry of one cell.
//!
//! All positions are whole pixels: ratios are applied to the cell size and floored, so the
//! same request always lands on the same pixel grid at any backend.

use kurbo::{Point, Rect};

use crate::config::LayoutRatios;
use crate::text::fit::FitConstraints;

fn floor_px(v: f64) -> f64 {
    v.max(0.0).floor()
}

/// Right triangle with its right angle at the bottom-right vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// Left edge (tip of the horizontal leg).
    pub left: f64,
    /// Top edge (tip of the vertical leg).
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Triangle {
    /// Vertices, right angle first.
    pub fn vertices(&self) -> [Point; 3] {
        [
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
            Point::new(self.right, self.top),
        ]
    }

    /// Horizontal leg.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical leg.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Bounding rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }
}

/// Rectangles, anchors and fitting bounds of a `width x height` cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLayout {
    /// Cell width in pixels.
    pub width: u32,
    /// Cell height in pixels.
    pub height: u32,
    /// Content margin.
    pub margin: f64,
    /// Top-right date region.
    pub date_area: Rect,
    /// Date region inset by the margin on its outer edges; the date ink is centered here.
    pub date_text_box: Rect,
    /// Fitting bounds of the date label.
    pub date_fit: FitConstraints,
    /// Decorative triangle in the bottom-right corner.
    pub triangle: Triangle,
    /// Center of the weekday ink.
    pub weekday_anchor: Point,
    /// Fitting bounds of the weekday label.
    pub weekday_fit: FitConstraints,
    /// Top-left month banner region.
    pub banner_area: Rect,
    /// Month number size.
    pub month_font_px: u32,
    /// English month name size.
    pub english_font_px: u32,
    /// Distance from the banner top to the top of the English month name.
    pub english_offset: f64,
}

impl CellLayout {
    /// Derive the layout of a `width x height` cell.
    pub fn compute(width: u32, height: u32, ratios: &LayoutRatios) -> Self {
        let w = f64::from(width);
        let h = f64::from(height);
        let bounds = Rect::new(0.0, 0.0, w, h);
        let short = w.min(h);
        let cell_area = w * h;

        let margin = floor_px(short * ratios.content_margin);

        let date_w = floor_px(w * ratios.date_area_width);
        let date_h = floor_px(h * ratios.date_area_height);
        let date_area = Rect::new(w - date_w, 0.0, w, date_h).intersect(bounds);
        let date_text_box = Rect::new(
            date_area.x0,
            margin.min(date_area.y1),
            (w - margin).max(date_area.x0),
            date_area.y1,
        );
        let date_max_w = (date_w - margin).max(1.0);
        let date_max_h = (date_h - margin).max(1.0);
        let date_fit = FitConstraints {
            max_width: date_max_w as u32,
            max_height: date_max_h as u32,
            target_area: (cell_area * ratios.date_text_area).min(date_max_w * date_max_h),
        };

        let tri_margin = floor_px(short * ratios.triangle_margin);
        let tri_w = floor_px(w * ratios.weekday_area_width * ratios.triangle_width);
        let tri_h = floor_px(h * ratios.weekday_area_height * ratios.triangle_height);
        let right = w - tri_margin;
        let bottom = h - tri_margin;
        let triangle = Triangle {
            left: (right - tri_w).max(0.0),
            top: (bottom - tri_h).max(0.0),
            right,
            bottom,
        };

        let inset = floor_px(triangle.height() * ratios.weekday_anchor_inset);
        let weekday_anchor = Point::new(right - inset, bottom - inset);

        let inner = floor_px(short * ratios.content_margin * 0.6).max(1.0);
        let leg_w = triangle.width().max(1.0);
        let leg_h = triangle.height().max(1.0);
        let wd_max_w = (floor_px(leg_w * ratios.weekday_text_width) - 2.0 * inner).max(1.0);
        let wd_max_h = (floor_px(leg_h * ratios.weekday_text_height) - 2.0 * inner).max(1.0);
        let weekday_fit = FitConstraints {
            max_width: wd_max_w as u32,
            max_height: wd_max_h as u32,
            target_area: (cell_area * ratios.weekday_text_area).min(wd_max_w * wd_max_h),
        };

        let month_font_px = floor_px(h * ratios.month_label_font) as u32;
        let english_font_px = if month_font_px == 0 {
            0
        } else {
            (floor_px(f64::from(month_font_px) * ratios.month_label_english) as u32).max(6)
        };
        let english_offset = floor_px(f64::from(month_font_px) * ratios.month_label_line_gap);
        let banner_area = Rect::new(
            margin,
            margin,
            date_area.x0.max(margin),
            triangle.top.max(margin),
        )
        .intersect(bounds);

        Self {
            width,
            height,
            margin,
            date_area,
            date_text_box,
            date_fit,
            triangle,
            weekday_anchor,
            weekday_fit,
            banner_area,
            month_font_px,
            english_font_px,
            english_offset,
        }
    }

    /// The whole cell.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Every derived region, for containment checks.
    pub fn regions(&self) -> [Rect; 4] {
        [
            self.date_area,
            self.date_text_box,
            self.triangle.bounds(),
            self.banner_area,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cell/layout.rs"]
mod tests;
