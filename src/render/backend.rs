use crate::cell::request::CellRequest;
use crate::foundation::error::{CalError, CalResult};
use crate::render::bitmap::CellBitmap;

/// Available backend kinds.
///
/// - `Vector` needs a resolved font that the SVG font database can use.
/// - `Raster` is always available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// SVG scene rasterized by `resvg`.
    Vector,
    /// Direct drawing with `vello_cpu`.
    Raster,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vector => f.write_str("vector"),
            Self::Raster => f.write_str("raster"),
        }
    }
}

/// One way of turning a [`CellRequest`] into pixels.
pub trait CellBackend {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Draw one cell at exactly `cell_width_px x cell_height_px`.
    fn render_cell(&mut self, req: &CellRequest) -> CalResult<CellBitmap>;
}

/// Result of rendering one cell through the backend chain.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The first backend succeeded.
    Rendered(CellBitmap),
    /// An earlier backend failed and a later one produced the bitmap.
    FallbackUsed {
        /// The bitmap from the backend that succeeded.
        bitmap: CellBitmap,
        /// Backend that produced `bitmap`.
        used: BackendKind,
        /// Failed backends with their error messages, in attempt order.
        failures: Vec<(BackendKind, String)>,
    },
    /// No backend could draw the cell.
    Failed(CalError),
}

impl RenderOutcome {
    /// The bitmap, when one was produced.
    pub fn bitmap(&self) -> Option<&CellBitmap> {
        match self {
            Self::Rendered(b) | Self::FallbackUsed { bitmap: b, .. } => Some(b),
            Self::Failed(_) => None,
        }
    }

    /// `true` for [`RenderOutcome::FallbackUsed`].
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackUsed { .. })
    }

    /// Turn the outcome into a plain result, dropping fallback details.
    pub fn into_result(self) -> CalResult<CellBitmap> {
        match self {
            Self::Rendered(b) | Self::FallbackUsed { bitmap: b, .. } => Ok(b),
            Self::Failed(e) => Err(e),
        }
    }
}

/// Renders cells through an ordered chain of backends, falling through on error.
///
/// One renderer belongs to one worker; build more with [`crate::RenderEnv::renderer`].
pub struct CellRenderer {
    backends: Vec<Box<dyn CellBackend>>,
}

impl CellRenderer {
    /// Renderer over an explicit backend chain, tried in order.
    pub fn from_backends(backends: Vec<Box<dyn CellBackend>>) -> Self {
        Self { backends }
    }

    /// Kinds of the installed backends, in attempt order.
    pub fn backend_kinds(&self) -> Vec<BackendKind> {
        self.backends.iter().map(|b| b.kind()).collect()
    }

    /// Render one cell. Never panics on backend failure; see [`RenderOutcome`].
    #[tracing::instrument(level = "debug", skip_all, fields(month = req.month, day = req.day))]
    pub fn render(&mut self, req: &CellRequest) -> RenderOutcome {
        if let Err(e) = req.check_dims() {
            return RenderOutcome::Failed(e);
        }

        let mut failures: Vec<(BackendKind, String)> = Vec::new();
        let mut last_err = None;
        for backend in &mut self.backends {
            let kind = backend.kind();
            let result = backend.render_cell(req).and_then(|bitmap| {
                if (bitmap.width, bitmap.height) != (req.cell_width_px, req.cell_height_px) {
                    return Err(CalError::raster(format!(
                        "{kind} backend returned {}x{}, expected {}x{}",
                        bitmap.width, bitmap.height, req.cell_width_px, req.cell_height_px
                    )));
                }
                Ok(bitmap)
            });

            match result {
                Ok(bitmap) if failures.is_empty() => return RenderOutcome::Rendered(bitmap),
                Ok(bitmap) => {
                    return RenderOutcome::FallbackUsed {
                        bitmap,
                        used: kind,
                        failures,
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        backend = %kind,
                        month = req.month,
                        day = req.day,
                        error = %e,
                        "cell backend failed; falling through"
                    );
                    failures.push((kind, e.to_string()));
                    last_err = Some(e);
                }
            }
        }

        RenderOutcome::Failed(
            last_err.unwrap_or_else(|| CalError::validation("cell renderer has no backends")),
        )
    }
}
