//! Cell backends, the fallback chain and the shared rendering environment.

/// Backend trait and the fallback chain.
pub mod backend;
/// Rendered cell pixels.
pub mod bitmap;
/// Shared rendering environment and backend capability detection.
pub mod env;
/// Direct drawing with `vello_cpu`.
pub mod raster;
/// SVG scenes rasterized with `resvg`.
pub mod vector;

#[cfg(test)]
#[path = "../../tests/unit/render/chain.rs"]
mod tests;
