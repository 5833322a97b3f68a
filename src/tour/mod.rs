//! Tour representation and move application.
//!
//! - [`Tour`]: two-slot adjacency per point, derived successor mapping, owned length cache
//! - [`SegmentList`]: optional parallel list of directed edges used by the segment-pair scan
//! - [`TourStats`]: edge-length summary of a tour

mod adjacency;
mod cycle;
mod segments;
mod stats;

pub use cycle::{Tour, START};
pub use segments::SegmentList;
pub use stats::TourStats;
