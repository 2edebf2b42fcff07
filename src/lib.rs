//! yearcal renders a full-year wall calendar as one raster image.
//!
//! Every day is an illustrated cell (date, weekday over a corner triangle, a month banner on
//! the first) and the 365 or 366 cells are tiled into 12 month rows:
//!
//! - Build a [`CalendarConfig`] (defaults or JSON) and a [`RenderEnv`]
//! - Render single cells with a [`CellRenderer`], or
//! - Compose and write the whole year with [`export_year`]
//!
//! Cells render through an ordered backend chain (SVG scene via `resvg`, then direct drawing
//! via `vello_cpu`); a failing backend falls through to the next and the outcome says so.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Calendar data for one year.
pub mod calendar;
/// Cell requests, layout and label placement.
pub mod cell;
/// Full-year composition.
pub mod compose;
/// Renderer configuration.
pub mod config;
/// Cell backends and the rendering environment.
pub mod render;
/// Fonts, measurement and fitting.
pub mod text;

pub use crate::foundation::color::{Rgba8, argb_hex_to_rgb, parse_argb_hex};
pub use crate::foundation::error::{CalError, CalResult};
pub use crate::foundation::units;

pub use crate::calendar::{DayInfo, MonthData, YearCalendar};
pub use crate::cell::layout::{CellLayout, Triangle};
pub use crate::cell::plan::{CellPlan, LabelRole, PlacedText};
pub use crate::cell::request::CellRequest;
pub use crate::compose::grid::{
    ComposeStats, GridComposer, GridGeometry, compose_year, export_cells, export_year, render_day,
};
pub use crate::config::{
    CalendarConfig, ColorConfig, FontConfig, GridConfig, LabelConfig, LabelStyle, LayoutRatios,
    OutputConfig, RenderConfig,
};
pub use crate::render::backend::{BackendKind, CellBackend, CellRenderer, RenderOutcome};
pub use crate::render::bitmap::CellBitmap;
pub use crate::render::env::{Capabilities, RenderEnv};
pub use crate::text::fit::{FitConstraints, FontFitter, FontSpec, GlyphSource};
pub use crate::text::measure::{BuiltinMeasurer, TextExtent, TextMeasure};
