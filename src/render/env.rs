use std::sync::Arc;

use crate::config::CalendarConfig;
use crate::foundation::error::{CalError, CalResult};
use crate::render::backend::{BackendKind, CellBackend, CellRenderer};
use crate::render::raster::RasterBackend;
use crate::render::vector::VectorBackend;
use crate::text::font::{ResolvedFont, resolve_font};

/// What this process can render with, detected once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// A font file was resolved.
    pub font: bool,
    /// The vector backend can be installed.
    pub vector: bool,
}

/// Shared, read-only rendering environment: config, resolved font and the SVG font database.
///
/// Build one per run and hand out per-worker renderers with [`RenderEnv::renderer`].
pub struct RenderEnv {
    config: Arc<CalendarConfig>,
    font: Option<ResolvedFont>,
    fontdb: Option<Arc<usvg::fontdb::Database>>,
    family: Option<String>,
    caps: Capabilities,
}

impl RenderEnv {
    /// Validate `config`, resolve the font once and detect backend capabilities.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new(config: CalendarConfig) -> CalResult<Self> {
        config.validate()?;

        let font = resolve_font(&config.fonts);
        if font.is_none() {
            let err = CalError::font_unavailable(format!(
                "none of {} candidate path(s) could be read",
                config.fonts.candidates().count()
            ));
            tracing::warn!(error = %err, "falling back to builtin glyphs");
        }

        let mut fontdb = None;
        let mut family = None;
        if let Some(f) = &font
            && config.render.prefer_vector
        {
            let mut db = usvg::fontdb::Database::new();
            db.load_font_source(usvg::fontdb::Source::Binary(f.bytes.clone()));
            let loaded = db
                .faces()
                .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
            match loaded {
                Some(name) => {
                    let has_family =
                        |want: &String| db.faces().any(|face| face.families.iter().any(|(n, _)| n == want));
                    let configured = config.fonts.family_name.as_ref().filter(|w| has_family(w));
                    family = Some(configured.cloned().unwrap_or(name));
                    tracing::debug!(faces = db.len(), family = ?family, "vector backend font database ready");
                    fontdb = Some(Arc::new(db));
                }
                None => tracing::warn!(
                    path = %f.path.display(),
                    "SVG font database could not load the resolved font; vector backend disabled"
                ),
            }
        }

        let caps = Capabilities {
            font: font.is_some(),
            vector: fontdb.is_some(),
        };
        Ok(Self {
            config: Arc::new(config),
            font,
            fontdb,
            family,
            caps,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Detected capabilities.
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// The resolved font, if any.
    pub fn font(&self) -> Option<&ResolvedFont> {
        self.font.as_ref()
    }

    /// Backend kinds a renderer from this environment tries, in order.
    pub fn backend_order(&self) -> Vec<BackendKind> {
        let mut out = Vec::with_capacity(2);
        if self.caps.vector {
            out.push(BackendKind::Vector);
        }
        out.push(BackendKind::Raster);
        out
    }

    /// A fresh renderer for one worker: vector first when capable, raster always last.
    pub fn renderer(&self) -> CellRenderer {
        let mut backends: Vec<Box<dyn CellBackend>> = Vec::with_capacity(2);
        if let (Some(font), Some(db), Some(family)) = (&self.font, &self.fontdb, &self.family) {
            match VectorBackend::new(Arc::clone(&self.config), font, Arc::clone(db), family.clone()) {
                Ok(b) => backends.push(Box::new(b)),
                Err(e) => tracing::warn!(error = %e, "vector backend unavailable for this worker"),
            }
        }
        backends.push(Box::new(RasterBackend::new(
            Arc::clone(&self.config),
            self.font.as_ref(),
        )));
        CellRenderer::from_backends(backends)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/env.rs"]
mod tests;
