//! Value types shared by the tour, the search, and the solver.
//!
//! Point ids are dense indices into the external coordinate arrays; lengths
//! are rounded integral Euclidean distances. Segments, moves, and swaps are
//! lightweight `Copy` records describing tour edges and 2-opt exchanges.

mod moves;
mod point;
mod segment;

pub use moves::{Move, Swap};
pub use point::{Length, PointId, EMPTY};
pub use segment::{EdgeKey, Segment};
