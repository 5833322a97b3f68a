//! Point id and length primitives.

/// Dense index of a point into the coordinate arrays, valid in `[0, n)`.
pub type PointId = usize;

/// Rounded Euclidean length of an edge, or a sum of such lengths.
pub type Length = u64;

/// Sentinel marking an unoccupied adjacency slot. Never a valid point id.
pub const EMPTY: PointId = PointId::MAX;
