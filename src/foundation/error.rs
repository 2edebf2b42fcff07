/// Crate-wide result alias.
pub type CalResult<T> = Result<T, CalError>;

/// Error kinds surfaced by the calendar renderer.
///
/// Soft failures (a missing font, a vector backend error) are recovered close to where they
/// happen and reported through [`crate::RenderOutcome`]; only the composition level turns
/// them into hard failures.
#[derive(thiserror::Error, Debug)]
pub enum CalError {
    /// Configuration or argument out of its valid range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A cell request violated the caller contract.
    #[error("invalid cell request: {0}")]
    InvalidRequest(String),

    /// No configured font file could be used.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// The vector backend failed to build or rasterize a cell scene.
    #[error("vector render error: {0}")]
    VectorRender(String),

    /// The raster backend failed to draw a cell.
    #[error("raster render error: {0}")]
    RasterRender(String),

    /// The full-year canvas could not be built or written.
    #[error("composition error: {0}")]
    Composition(String),

    /// Config file could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CalError {
    /// Build a [`CalError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CalError::InvalidRequest`].
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Build a [`CalError::FontUnavailable`].
    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    /// Build a [`CalError::VectorRender`].
    pub fn vector(msg: impl Into<String>) -> Self {
        Self::VectorRender(msg.into())
    }

    /// Build a [`CalError::RasterRender`].
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::RasterRender(msg.into())
    }

    /// Build a [`CalError::Composition`].
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition(msg.into())
    }

    /// Build a [`CalError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
