use std::sync::Arc;

use crate::cell::request::CellRequest;
use crate::config::{CalendarConfig, FontConfig};
use crate::foundation::error::{CalError, CalResult};
use crate::render::backend::{BackendKind, CellBackend, CellRenderer, RenderOutcome};
use crate::render::bitmap::CellBitmap;
use crate::render::raster::RasterBackend;

struct FailingBackend;

impl CellBackend for FailingBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Vector
    }

    fn render_cell(&mut self, _req: &CellRequest) -> CalResult<CellBitmap> {
        Err(CalError::vector("injected failure"))
    }
}

struct WrongSizeBackend;

impl CellBackend for WrongSizeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Vector
    }

    fn render_cell(&mut self, _req: &CellRequest) -> CalResult<CellBitmap> {
        CellBitmap::from_premul(1, 1, vec![0; 4])
    }
}

fn config() -> Arc<CalendarConfig> {
    let mut cfg = CalendarConfig {
        fonts: FontConfig::builtin_only(),
        ..CalendarConfig::default()
    };
    cfg.render.render_scale = 2;
    Arc::new(cfg)
}

fn raster() -> Box<dyn CellBackend> {
    Box::new(RasterBackend::new(config(), None))
}

fn request() -> CellRequest {
    CellRequest::new(1, 1, "THU", 80, 64, false).unwrap()
}

#[test]
fn raster_alone_renders_exact_size() {
    let mut r = CellRenderer::from_backends(vec![raster()]);
    let out = r.render(&request());
    assert!(matches!(out, RenderOutcome::Rendered(_)));
    let b = out.into_result().unwrap();
    assert_eq!((b.width, b.height), (80, 64));
    assert!(b.premultiplied);
    // Bottom-right corner is inside the triangle.
    assert_eq!(b.pixel(79, 63), Some([0, 0, 0, 255]));
    // Far left, below the banner, nothing is drawn.
    assert_eq!(b.pixel(1, 62), Some([0, 0, 0, 0]));
}

#[test]
fn injected_vector_failure_falls_back_to_raster() {
    let mut r = CellRenderer::from_backends(vec![Box::new(FailingBackend), raster()]);
    match r.render(&request()) {
        RenderOutcome::FallbackUsed {
            bitmap,
            used,
            failures,
        } => {
            assert_eq!((bitmap.width, bitmap.height), (80, 64));
            assert_eq!(used, BackendKind::Raster);
            assert_eq!(failures.len(), 1);
            assert!(failures[0].1.contains("injected failure"));
        }
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[test]
fn wrong_size_bitmap_counts_as_failure() {
    let mut r = CellRenderer::from_backends(vec![Box::new(WrongSizeBackend), raster()]);
    let out = r.render(&request());
    assert!(out.is_fallback());
    assert_eq!(out.bitmap().map(|b| (b.width, b.height)), Some((80, 64)));
}

#[test]
fn all_backends_failing_is_reported() {
    let mut r = CellRenderer::from_backends(vec![Box::new(FailingBackend)]);
    assert!(matches!(
        r.render(&request()),
        RenderOutcome::Failed(CalError::VectorRender(_))
    ));
    let mut empty = CellRenderer::from_backends(Vec::new());
    assert!(matches!(empty.render(&request()), RenderOutcome::Failed(_)));
}

#[test]
fn zero_sized_request_fails_without_drawing() {
    let mut req = request();
    req.cell_width_px = 0;
    let mut r = CellRenderer::from_backends(vec![raster()]);
    assert!(matches!(
        r.render(&req),
        RenderOutcome::Failed(CalError::InvalidRequest(_))
    ));
}

#[test]
fn identical_requests_render_identical_pixels() {
    let mut a = CellRenderer::from_backends(vec![raster()]);
    let mut b = CellRenderer::from_backends(vec![raster()]);
    let first = a.render(&request()).into_result().unwrap();
    let again = a.render(&request()).into_result().unwrap();
    let other = b.render(&request()).into_result().unwrap();
    assert_eq!(first, again);
    assert_eq!(first, other);
}

#[test]
fn invalid_dates_still_draw_the_triangle() {
    let req = CellRequest::new(2, 30, "", 80, 64, false).unwrap();
    let mut r = CellRenderer::from_backends(vec![raster()]);
    let b = r.render(&req).into_result().unwrap();
    assert_eq!(b.pixel(79, 63), Some([0, 0, 0, 255]));
    assert_eq!(b.pixel(75, 3), Some([0, 0, 0, 0]));
}
