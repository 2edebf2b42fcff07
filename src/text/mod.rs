//! Fonts, shaping, ink measurement and font fitting.

pub(crate) mod builtin;
pub(crate) mod engine;
pub mod fit;
/// Font file resolution.
pub mod font;
pub mod measure;
