//! Immutable renderer configuration.
//!
//! A [`CalendarConfig`] is built once (defaults, or a JSON file) and then passed by reference
//! to every component. All fields are optional in JSON; unknown keys are rejected.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cell::request::MAX_CELL_DIM;
use crate::foundation::color::Rgba8;
use crate::foundation::error::{CalError, CalResult};
use crate::foundation::units;

/// Number of day columns in the composite: the longest month.
pub const DAYS_PER_MONTH_MAX: u32 = 31;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// Cell and row geometry.
    pub grid: GridConfig,
    /// Fill and text colors.
    pub colors: ColorConfig,
    /// Font file resolution.
    pub fonts: FontConfig,
    /// Ratio constants of the in-cell layout.
    pub layout: LayoutRatios,
    /// Backend selection and threading.
    pub render: RenderConfig,
    /// Display labels.
    pub labels: LabelConfig,
    /// Output naming.
    pub output: OutputConfig,
}

/// Grid geometry, expressed in spreadsheet units like the printed calendar it mirrors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Day column width in spreadsheet character units.
    pub column_width_units: f64,
    /// Month row height in points.
    pub row_height_points: f64,
    /// Spacer row height as a fraction of the month row height.
    pub spacer_height_ratio: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            column_width_units: 22.0,
            row_height_points: 120.0,
            spacer_height_ratio: 0.25,
        }
    }
}

impl GridConfig {
    /// Day cell width in pixels.
    pub fn day_cell_width_px(&self) -> u32 {
        units::column_width_to_pixels(self.column_width_units)
    }

    /// Day cell (and month row) height in pixels.
    pub fn day_cell_height_px(&self) -> u32 {
        units::points_to_pixels(self.row_height_points)
    }

    /// Spacer row height in pixels, `round(h * ratio)`.
    pub fn spacer_height_px(&self) -> u32 {
        (f64::from(self.day_cell_height_px()) * self.spacer_height_ratio)
            .max(0.0)
            .round() as u32
    }
}

/// Colors. Backgrounds default to the printed calendar's ARGB palette.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Canvas color under spacer rows.
    pub canvas: Rgba8,
    /// Background of Saturday/Sunday cells.
    pub weekend_bg: Rgba8,
    /// Background of weekday cells and blank trailing slots.
    pub weekday_bg: Rgba8,
    /// Cell outline.
    pub border: Rgba8,
    /// Date number and month banner.
    pub date_text: Rgba8,
    /// Decorative triangle.
    pub triangle: Rgba8,
    /// Weekday label drawn over the triangle.
    pub weekday_text: Rgba8,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            canvas: Rgba8::WHITE,
            weekend_bg: Rgba8::rgb(0xE8, 0xF4, 0xFF),
            weekday_bg: Rgba8::WHITE,
            border: Rgba8::BLACK,
            date_text: Rgba8::BLACK,
            triangle: Rgba8::BLACK,
            weekday_text: Rgba8::WHITE,
        }
    }
}

/// Font resolution order: `path`, then each of `fallback_paths`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Preferred font file.
    pub path: Option<PathBuf>,
    /// Tried in order when `path` is missing.
    pub fallback_paths: Vec<PathBuf>,
    /// Family name advertised to the vector backend ahead of the family found in the file.
    pub family_name: Option<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from("/System/Library/Fonts/Hiragino Sans GB.ttc")),
            fallback_paths: vec![
                PathBuf::from("/System/Library/Fonts/STHeiti Medium.ttc"),
                PathBuf::from("/System/Library/Fonts/STHeiti Light.ttc"),
                PathBuf::from("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc"),
                PathBuf::from("/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc"),
            ],
            family_name: Some("Hiragino Sans GB".to_string()),
        }
    }
}

impl FontConfig {
    /// Candidate paths in resolution order.
    pub fn candidates(&self) -> impl Iterator<Item = &Path> {
        self.path
            .iter()
            .chain(self.fallback_paths.iter())
            .map(PathBuf::as_path)
    }

    /// A config that never touches the file system and always uses the builtin glyphs.
    pub fn builtin_only() -> Self {
        Self {
            path: None,
            fallback_paths: Vec::new(),
            family_name: None,
        }
    }
}

/// Ratio constants of the cell layout, relative to the cell width `W` and height `H`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutRatios {
    /// Date region width / W.
    pub date_area_width: f64,
    /// Date region height / H.
    pub date_area_height: f64,
    /// Weekday region width / W.
    pub weekday_area_width: f64,
    /// Weekday region height / H.
    pub weekday_area_height: f64,
    /// Content margin / min(W, H).
    pub content_margin: f64,
    /// Gap between triangle and cell edge / min(W, H).
    pub triangle_margin: f64,
    /// Triangle width / weekday region width.
    pub triangle_width: f64,
    /// Triangle height / weekday region height.
    pub triangle_height: f64,
    /// Date ink area budget / (W * H).
    pub date_text_area: f64,
    /// Weekday ink area budget / (W * H).
    pub weekday_text_area: f64,
    /// Weekday fit box width / triangle width.
    pub weekday_text_width: f64,
    /// Weekday fit box height / triangle height.
    pub weekday_text_height: f64,
    /// Weekday label center inset from the right-angle vertex / triangle height.
    pub weekday_anchor_inset: f64,
    /// Month number font size / H.
    pub month_label_font: f64,
    /// English month name size / month number size.
    pub month_label_english: f64,
    /// Distance between banner lines / month number size.
    pub month_label_line_gap: f64,
    /// Month number stroke width in pixels.
    pub month_label_stroke: u32,
    /// English month name stroke width in pixels.
    pub month_label_english_stroke: u32,
}

impl Default for LayoutRatios {
    fn default() -> Self {
        Self {
            date_area_width: 0.45,
            date_area_height: 0.45,
            weekday_area_width: 0.45,
            weekday_area_height: 0.35,
            content_margin: 0.04,
            triangle_margin: 0.0,
            triangle_width: 1.0,
            triangle_height: 1.0,
            date_text_area: 0.025,
            weekday_text_area: 0.01875,
            weekday_text_width: 0.55,
            weekday_text_height: 0.55,
            weekday_anchor_inset: 0.38,
            month_label_font: 0.208,
            month_label_english: 0.385,
            month_label_line_gap: 1.05,
            month_label_stroke: 2,
            month_label_english_stroke: 1,
        }
    }
}

/// Backend and threading options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Install the vector backend ahead of the raster backend when a font is available.
    pub prefer_vector: bool,
    /// Raster backend supersampling factor.
    pub render_scale: u32,
    /// Render cells on a worker pool.
    pub parallel: bool,
    /// Worker count; `None` uses every available core.
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            prefer_vector: true,
            render_scale: 4,
            parallel: true,
            threads: None,
        }
    }
}

/// Which weekday label set cells show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// Localized labels (`weekday_localized`).
    #[default]
    Localized,
    /// English abbreviations (`weekday_english`).
    English,
}

/// Fixed label sets. Weekdays are Monday-first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    /// Active weekday label set.
    pub style: LabelStyle,
    /// Localized weekday labels.
    pub weekday_localized: Vec<String>,
    /// English weekday labels.
    pub weekday_english: Vec<String>,
    /// English month names for the banner.
    pub month_names: Vec<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        fn owned(v: &[&str]) -> Vec<String> {
            v.iter().map(|s| (*s).to_string()).collect()
        }
        Self {
            style: LabelStyle::Localized,
            weekday_localized: owned(&["周一", "周二", "周三", "周四", "周五", "周六", "周日"]),
            weekday_english: owned(&["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"]),
            month_names: owned(&[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
        }
    }
}

impl LabelConfig {
    /// Weekday label for a Monday-first index, per the active style.
    pub fn weekday(&self, index: u32) -> &str {
        let set = match self.style {
            LabelStyle::Localized => &self.weekday_localized,
            LabelStyle::English => &self.weekday_english,
        };
        set.get(index as usize).map(String::as_str).unwrap_or("")
    }

    /// English month name for `1..=12`, empty otherwise.
    pub fn month_name(&self, month: u32) -> &str {
        month
            .checked_sub(1)
            .and_then(|i| self.month_names.get(i as usize))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Output file naming.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Composite file name; `{year}` is substituted.
    pub image_pattern: String,
    /// Directory for per-day cell exports.
    pub cells_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image_pattern: "yearly_calendar_{year}.png".to_string(),
            cells_dir: PathBuf::from("./temp_calendar_images"),
        }
    }
}

impl OutputConfig {
    /// Composite file name for `year`.
    pub fn image_path(&self, year: i32) -> PathBuf {
        PathBuf::from(self.image_pattern.replace("{year}", &year.to_string()))
    }

    /// Per-day cell file name, `day_MM_DD.png`.
    pub fn cell_file_name(month: u32, day: u32) -> String {
        format!("day_{month:02}_{day:02}.png")
    }

    /// Whether `name` has the `day_MM_DD.png` shape of an exported cell.
    pub fn is_cell_file_name(name: &str) -> bool {
        let Some(rest) = name
            .strip_prefix("day_")
            .and_then(|r| r.strip_suffix(".png"))
        else {
            return false;
        };
        let b = rest.as_bytes();
        b.len() == 5
            && b[2] == b'_'
            && [b[0], b[1], b[3], b[4]].iter().all(u8::is_ascii_digit)
    }
}

impl CalendarConfig {
    /// Parse a config from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> CalResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| CalError::serde(format!("parse calendar config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> CalResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CalError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every range the renderer relies on.
    pub fn validate(&self) -> CalResult<()> {
        if self.grid.day_cell_width_px() == 0 || self.grid.day_cell_height_px() == 0 {
            return Err(CalError::validation(
                "grid column width and row height must produce non-zero pixel sizes",
            ));
        }
        let (cw, ch) = (self.grid.day_cell_width_px(), self.grid.day_cell_height_px());
        if cw > MAX_CELL_DIM || ch > MAX_CELL_DIM {
            return Err(CalError::validation(format!(
                "grid cell size {cw}x{ch} exceeds {MAX_CELL_DIM}x{MAX_CELL_DIM}"
            )));
        }
        if !(0.0..=4.0).contains(&self.grid.spacer_height_ratio) {
            return Err(CalError::validation(
                "grid.spacer_height_ratio must be in 0..=4",
            ));
        }

        let l = &self.layout;
        let unit = [
            ("date_area_width", l.date_area_width),
            ("date_area_height", l.date_area_height),
            ("weekday_area_width", l.weekday_area_width),
            ("weekday_area_height", l.weekday_area_height),
            ("triangle_width", l.triangle_width),
            ("triangle_height", l.triangle_height),
            ("date_text_area", l.date_text_area),
            ("weekday_text_area", l.weekday_text_area),
            ("weekday_text_width", l.weekday_text_width),
            ("weekday_text_height", l.weekday_text_height),
            ("weekday_anchor_inset", l.weekday_anchor_inset),
            ("month_label_font", l.month_label_font),
            ("month_label_english", l.month_label_english),
        ];
        for (name, v) in unit {
            if !(v.is_finite() && v > 0.0 && v <= 1.0) {
                return Err(CalError::validation(format!(
                    "layout.{name} must be in (0, 1], got {v}"
                )));
            }
        }
        for (name, v) in [
            ("content_margin", l.content_margin),
            ("triangle_margin", l.triangle_margin),
        ] {
            if !(v.is_finite() && (0.0..0.5).contains(&v)) {
                return Err(CalError::validation(format!(
                    "layout.{name} must be in [0, 0.5), got {v}"
                )));
            }
        }
        if !(l.month_label_line_gap.is_finite() && l.month_label_line_gap > 0.0) {
            return Err(CalError::validation(
                "layout.month_label_line_gap must be > 0",
            ));
        }

        if !(1..=16).contains(&self.render.render_scale) {
            return Err(CalError::validation("render.render_scale must be in 1..=16"));
        }
        if self.render.threads == Some(0) {
            return Err(CalError::validation(
                "render.threads must be >= 1 when set",
            ));
        }

        if self.labels.weekday_localized.len() != 7 || self.labels.weekday_english.len() != 7 {
            return Err(CalError::validation(
                "weekday label sets must have exactly 7 entries",
            ));
        }
        if self.labels.month_names.len() != 12 {
            return Err(CalError::validation(
                "labels.month_names must have exactly 12 entries",
            ));
        }
        if !self.output.image_pattern.contains("{year}") {
            tracing::debug!(
                pattern = %self.output.image_pattern,
                "output pattern has no {{year}} placeholder"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/config.rs"]
mod tests;
