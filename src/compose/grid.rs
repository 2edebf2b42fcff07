use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use rayon::prelude::*;

use crate::calendar::YearCalendar;
use crate::cell::request::CellRequest;
use crate::config::{DAYS_PER_MONTH_MAX, GridConfig, OutputConfig};
use crate::foundation::color::Rgba8;
use crate::foundation::error::{CalError, CalResult};
use crate::foundation::math::premul_over_rgb;
use crate::render::backend::RenderOutcome;
use crate::render::bitmap::CellBitmap;
use crate::render::env::RenderEnv;

/// What a composite row holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// Day cells of a month, `1..=12`.
    Month(u32),
    /// Blank gap between two months.
    Spacer,
}

/// One row of the composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRow {
    /// Row content.
    pub kind: RowKind,
    /// Top edge in pixels.
    pub y: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Pixel geometry of the full-year composite: 12 month rows separated by 11 spacers, 31 columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    /// Day cell width.
    pub cell_width: u32,
    /// Day cell (and month row) height.
    pub cell_height: u32,
    /// Spacer row height.
    pub spacer_height: u32,
    /// Column count.
    pub columns: u32,
    /// All 23 rows, top to bottom.
    pub rows: Vec<GridRow>,
}

impl GridGeometry {
    /// Geometry for a grid config.
    pub fn from_config(grid: &GridConfig) -> Self {
        let cell_width = grid.day_cell_width_px();
        let cell_height = grid.day_cell_height_px();
        let spacer_height = grid.spacer_height_px();

        let mut rows = Vec::with_capacity(23);
        let mut y = 0u32;
        for month in 1..=12u32 {
            if month > 1 {
                rows.push(GridRow {
                    kind: RowKind::Spacer,
                    y,
                    height: spacer_height,
                });
                y = y.saturating_add(spacer_height);
            }
            rows.push(GridRow {
                kind: RowKind::Month(month),
                y,
                height: cell_height,
            });
            y = y.saturating_add(cell_height);
        }

        Self {
            cell_width,
            cell_height,
            spacer_height,
            columns: DAYS_PER_MONTH_MAX,
            rows,
        }
    }

    /// Composite width.
    pub fn width(&self) -> u32 {
        self.columns.saturating_mul(self.cell_width)
    }

    /// Composite height.
    pub fn height(&self) -> u32 {
        self.rows
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.height))
    }

    /// Top edge of the row of `month`.
    pub fn month_y(&self, month: u32) -> Option<u32> {
        self.rows
            .iter()
            .find(|r| r.kind == RowKind::Month(month))
            .map(|r| r.y)
    }

    /// Top-left corner of the cell in column `day` of `month`'s row.
    pub fn cell_origin(&self, month: u32, day: u32) -> Option<(u32, u32)> {
        if !(1..=self.columns).contains(&day) {
            return None;
        }
        let x = (day - 1).checked_mul(self.cell_width)?;
        Some((x, self.month_y(month)?))
    }
}

/// Counters of one composition run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComposeStats {
    /// Cells with content (365 or 366).
    pub cells: usize,
    /// Cells drawn by a later backend after an earlier one failed.
    pub fallbacks: usize,
    /// Cells no backend could draw; they keep background and border only.
    pub failures: usize,
    /// Trailing blank slots past the end of a month.
    pub blank_cells: usize,
}

impl ComposeStats {
    fn record(&mut self, outcome: &RenderOutcome) {
        self.cells += 1;
        match outcome {
            RenderOutcome::Rendered(_) => {}
            RenderOutcome::FallbackUsed { .. } => self.fallbacks += 1,
            RenderOutcome::Failed(_) => self.failures += 1,
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> CalResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CalError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CalError::composition(format!("failed to build rayon thread pool: {e}")))
}

/// Tiles rendered cells into the full-year composite.
///
/// Cells render first, in parallel when configured, each worker with its own renderer; the
/// canvas is then written strictly sequentially in month/day order.
pub struct GridComposer<'a> {
    env: &'a RenderEnv,
    geometry: GridGeometry,
}

impl<'a> GridComposer<'a> {
    /// Composer for `env`'s grid config.
    pub fn new(env: &'a RenderEnv) -> Self {
        Self {
            env,
            geometry: GridGeometry::from_config(&env.config().grid),
        }
    }

    /// Composite geometry.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// One request per existing day, in month/day order.
    pub fn requests(&self, calendar: &YearCalendar) -> CalResult<Vec<CellRequest>> {
        calendar
            .days()
            .map(|d| d.cell_request(self.geometry.cell_width, self.geometry.cell_height))
            .collect()
    }

    /// Render every day of `calendar`, in month/day order.
    #[tracing::instrument(level = "debug", skip_all, fields(year = calendar.year))]
    pub fn render_cells(&self, calendar: &YearCalendar) -> CalResult<Vec<RenderOutcome>> {
        let requests = self.requests(calendar)?;
        let render = &self.env.config().render;

        if !render.parallel {
            let mut renderer = self.env.renderer();
            return Ok(requests.iter().map(|r| renderer.render(r)).collect());
        }

        let pool = build_thread_pool(render.threads)?;
        let env = self.env;
        Ok(pool.install(|| {
            requests
                .par_iter()
                .map_init(|| env.renderer(), |renderer, req| renderer.render(req))
                .collect::<Vec<_>>()
        }))
    }

    /// Render and compose `calendar` into an RGB canvas.
    #[tracing::instrument(level = "info", skip_all, fields(year = calendar.year))]
    pub fn compose(&self, calendar: &YearCalendar) -> CalResult<(RgbImage, ComposeStats)> {
        let outcomes = self.render_cells(calendar)?;
        self.compose_rendered(calendar, &outcomes)
    }

    /// Compose already rendered cells; `outcomes` must follow [`GridComposer::requests`] order.
    pub fn compose_rendered(
        &self,
        calendar: &YearCalendar,
        outcomes: &[RenderOutcome],
    ) -> CalResult<(RgbImage, ComposeStats)> {
        if outcomes.len() != calendar.total_cells() {
            return Err(CalError::composition(format!(
                "{} rendered cells for {} days",
                outcomes.len(),
                calendar.total_cells()
            )));
        }

        let g = &self.geometry;
        let (w, h) = (g.width(), g.height());
        (w as usize)
            .checked_mul(h as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| CalError::composition(format!("canvas {w}x{h} is too large")))?;
        if w == 0 || h == 0 {
            return Err(CalError::composition("canvas has zero size"));
        }

        let colors = &self.env.config().colors;
        let mut canvas = RgbImage::from_pixel(w, h, Rgb(colors.canvas.to_rgb()));
        let mut stats = ComposeStats::default();
        let mut outcomes = outcomes.iter();

        for month in &calendar.months {
            for col in 1..=g.columns {
                let Some((x, y)) = g.cell_origin(month.month, col) else {
                    return Err(CalError::composition(format!(
                        "no grid slot for {:02}-{col:02}",
                        month.month
                    )));
                };
                match month.cells.get(col as usize - 1) {
                    Some(day) => {
                        let bg = if day.is_weekend {
                            colors.weekend_bg
                        } else {
                            colors.weekday_bg
                        };
                        fill_rect(&mut canvas, x, y, g.cell_width, g.cell_height, bg);
                        let outcome = outcomes.next().ok_or_else(|| {
                            CalError::composition("ran out of rendered cells")
                        })?;
                        stats.record(outcome);
                        match outcome.bitmap() {
                            Some(bitmap) => paste_premul(&mut canvas, bitmap, x, y),
                            None => tracing::warn!(
                                month = day.month,
                                day = day.day,
                                "cell failed to render; leaving it blank"
                            ),
                        }
                    }
                    None => {
                        fill_rect(&mut canvas, x, y, g.cell_width, g.cell_height, colors.weekday_bg);
                        stats.blank_cells += 1;
                    }
                }
                stroke_rect(&mut canvas, x, y, g.cell_width, g.cell_height, colors.border);
            }
        }

        tracing::info!(
            cells = stats.cells,
            fallbacks = stats.fallbacks,
            failures = stats.failures,
            width = w,
            height = h,
            "composed year"
        );
        Ok((canvas, stats))
    }
}

fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgba8) {
    let x1 = (x + w).min(canvas.width());
    let y1 = (y + h).min(canvas.height());
    for py in y..y1 {
        for px in x..x1 {
            let dst = canvas.get_pixel_mut(px, py);
            dst.0 = premul_over_rgb(dst.0, color.to_premul());
        }
    }
}

/// 1 px outline on the innermost pixels of the cell rectangle.
fn stroke_rect(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgba8) {
    if w == 0 || h == 0 {
        return;
    }
    fill_rect(canvas, x, y, w, 1, color);
    fill_rect(canvas, x, y + h - 1, w, 1, color);
    fill_rect(canvas, x, y, 1, h, color);
    fill_rect(canvas, x + w - 1, y, 1, h, color);
}

fn paste_premul(canvas: &mut RgbImage, bitmap: &CellBitmap, x: u32, y: u32) {
    let premul = |px: [u8; 4]| {
        if bitmap.premultiplied {
            px
        } else {
            crate::foundation::math::premul_rgba8(px)
        }
    };
    for by in 0..bitmap.height {
        let cy = y + by;
        if cy >= canvas.height() {
            break;
        }
        for bx in 0..bitmap.width {
            let cx = x + bx;
            if cx >= canvas.width() {
                break;
            }
            let Some(src) = bitmap.pixel(bx, by) else {
                continue;
            };
            if src[3] == 0 {
                continue;
            }
            let dst = canvas.get_pixel_mut(cx, cy);
            dst.0 = premul_over_rgb(dst.0, premul(src));
        }
    }
}

fn write_png(img: &RgbImage, path: &Path) -> CalResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CalError::composition(format!("create '{}': {e}", parent.display()))
        })?;
    }
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| CalError::composition(format!("write '{}': {e}", path.display())))
}

/// Render and compose the full year.
pub fn compose_year(env: &RenderEnv, year: i32) -> CalResult<(RgbImage, ComposeStats)> {
    let calendar = YearCalendar::generate(year, &env.config().labels)?;
    GridComposer::new(env).compose(&calendar)
}

/// Compose the full year and write it as PNG to `out`, or to the configured pattern.
pub fn export_year(
    env: &RenderEnv,
    year: i32,
    out: Option<&Path>,
) -> CalResult<(PathBuf, ComposeStats)> {
    let path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| env.config().output.image_path(year));
    let (canvas, stats) = compose_year(env, year)?;
    write_png(&canvas, &path)?;
    tracing::info!(path = %path.display(), "wrote composite");
    Ok((path, stats))
}

/// Render every day of `year` into `day_MM_DD.png` files under `dir` (or the configured
/// directory).
///
/// Cell files left by an earlier run are removed first; anything else in the directory is
/// left alone.
pub fn export_cells(
    env: &RenderEnv,
    year: i32,
    dir: Option<&Path>,
) -> CalResult<(PathBuf, ComposeStats)> {
    let dir = dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| env.config().output.cells_dir.clone());
    std::fs::create_dir_all(&dir)
        .map_err(|e| CalError::composition(format!("create '{}': {e}", dir.display())))?;
    let removed = remove_stale_cells(&dir)?;
    if removed > 0 {
        tracing::debug!(dir = %dir.display(), removed, "removed stale cell images");
    }

    let calendar = YearCalendar::generate(year, &env.config().labels)?;
    let composer = GridComposer::new(env);
    let outcomes = composer.render_cells(&calendar)?;

    let mut stats = ComposeStats::default();
    for (day, outcome) in calendar.days().zip(&outcomes) {
        stats.record(outcome);
        let Some(bitmap) = outcome.bitmap() else {
            continue;
        };
        let path = dir.join(OutputConfig::cell_file_name(day.month, day.day));
        bitmap
            .to_rgba_image()?
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| CalError::composition(format!("write '{}': {e}", path.display())))?;
    }
    tracing::info!(dir = %dir.display(), cells = stats.cells, "wrote cell images");
    Ok((dir, stats))
}

fn remove_stale_cells(dir: &Path) -> CalResult<usize> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| CalError::composition(format!("list '{}': {e}", dir.display())))?;
    let mut removed = 0;
    for entry in entries {
        let entry =
            entry.map_err(|e| CalError::composition(format!("list '{}': {e}", dir.display())))?;
        let path = entry.path();
        let is_cell = path.is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(OutputConfig::is_cell_file_name);
        if !is_cell {
            continue;
        }
        std::fs::remove_file(&path)
            .map_err(|e| CalError::composition(format!("remove '{}': {e}", path.display())))?;
        removed += 1;
    }
    Ok(removed)
}

/// Render the cell of one date.
pub fn render_day(env: &RenderEnv, year: i32, month: u32, day: u32) -> CalResult<RenderOutcome> {
    let calendar = YearCalendar::generate(year, &env.config().labels)?;
    let info = calendar.day(month, day).ok_or_else(|| {
        CalError::validation(format!("{year:04}-{month:02}-{day:02} is not a date"))
    })?;
    let grid = &env.config().grid;
    let req = info.cell_request(grid.day_cell_width_px(), grid.day_cell_height_px())?;
    Ok(env.renderer().render(&req))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/grid.rs"]
mod tests;
