//! Cell requests, cell geometry and label placement.

pub mod layout;
/// Fitted and placed labels of one cell.
pub mod plan;
/// Per-cell render requests.
pub mod request;
