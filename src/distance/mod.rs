//! Edge lengths between planar points.
//!
//! - [`DistanceCalculator`]: uncached rounded Euclidean length over borrowed coordinates
//! - [`LengthMap`]: cache of the lengths of edges currently in the tour

mod calculator;
mod length_map;

pub use calculator::DistanceCalculator;
pub use length_map::LengthMap;
