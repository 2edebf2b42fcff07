//! Full-year composition and file export.

/// Grid geometry, composition and PNG export.
pub mod grid;
