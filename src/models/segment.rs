//! Directed tour edges and their canonical undirected keys.

use serde::{Deserialize, Serialize};

use super::{Length, PointId};
use crate::distance::LengthMap;

/// An unordered point pair normalized as `(min, max)`.
///
/// # Examples
///
/// ```
/// use u_twoopt::models::EdgeKey;
///
/// assert_eq!(EdgeKey::new(7, 2), EdgeKey::new(2, 7));
/// assert_eq!(EdgeKey::new(7, 2).low(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey(PointId, PointId);

impl EdgeKey {
    /// Creates the canonical key for the edge between `a` and `b`.
    pub fn new(a: PointId, b: PointId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The smaller endpoint.
    pub fn low(&self) -> PointId {
        self.0
    }

    /// The larger endpoint.
    pub fn high(&self) -> PointId {
        self.1
    }
}

/// A directed tour edge "`b` follows `a`" with its cached length.
///
/// While a segment list is in sync with its tour, every segment satisfies
/// `b == tour.successor(a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub a: PointId,
    /// End point (the successor of `a`).
    pub b: PointId,
    /// Rounded Euclidean length of the edge.
    pub length: Length,
}

impl Segment {
    /// Creates a segment, looking the length up in the cache or computing it.
    pub fn new(a: PointId, b: PointId, lengths: &LengthMap<'_>) -> Self {
        Self {
            a,
            b,
            length: lengths.compute_length(a, b),
        }
    }

    /// Canonical undirected key of this edge.
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.a, self.b)
    }

    /// Returns `true` if `point` is one of the two endpoints.
    pub fn touches(&self, point: PointId) -> bool {
        self.a == point || self.b == point
    }

    /// Returns `true` if the two segments may be reconnected by a 2-opt move.
    ///
    /// Segments sharing an endpoint are rejected: in a tour they are adjacent,
    /// and reconnecting them either reproduces the same cycle or splits it.
    pub fn compatible(&self, other: &Segment) -> bool {
        !self.touches(other.a) && !self.touches(other.b)
    }

    /// Swaps the endpoints in place.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.a, &mut self.b);
    }
}
