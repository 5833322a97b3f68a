//! Cache of tour edge lengths.

use std::collections::HashMap;

use super::DistanceCalculator;
use crate::error::{Error, Result};
use crate::models::{EdgeKey, Length, PointId};

/// Lengths of the edges currently in the tour, keyed canonically by
/// `(min(a, b), max(a, b))`.
///
/// The cache holds exactly one entry per live tour edge, so it stays at n
/// entries. Candidate edges evaluated during search go through
/// [`compute_length`](Self::compute_length), which never caches.
///
/// # Examples
///
/// ```
/// use u_twoopt::distance::{DistanceCalculator, LengthMap};
///
/// let x = [0.0, 3.0, 3.0];
/// let y = [0.0, 0.0, 4.0];
/// let calc = DistanceCalculator::new(&x, &y).unwrap();
/// let lengths = LengthMap::new(calc, &[0, 1, 2]);
/// assert_eq!(lengths.len(), 3);
/// assert_eq!(lengths.get(2, 0), Some(5));
/// ```
#[derive(Debug, Clone)]
pub struct LengthMap<'a> {
    calculator: DistanceCalculator<'a>,
    lengths: HashMap<EdgeKey, Length>,
}

impl<'a> LengthMap<'a> {
    /// Caches the lengths of every edge of the cycle `ordered_points`,
    /// including the closing edge from the last point back to the first.
    pub fn new(calculator: DistanceCalculator<'a>, ordered_points: &[PointId]) -> Self {
        let mut map = Self {
            calculator,
            lengths: HashMap::with_capacity(ordered_points.len()),
        };
        if let Some(&last) = ordered_points.last() {
            let mut prev = last;
            for &current in ordered_points {
                let length = calculator.length(prev, current);
                map.insert(prev, current, length);
                prev = current;
            }
        }
        map
    }

    /// Stores the length of edge `(a, b)`, replacing any existing entry.
    pub fn insert(&mut self, a: PointId, b: PointId, length: Length) {
        self.lengths.insert(EdgeKey::new(a, b), length);
    }

    /// Removes the entry for edge `(a, b)` and returns its length.
    ///
    /// Returns [`Error::MissingEdge`] if the edge is not cached.
    pub fn erase(&mut self, a: PointId, b: PointId) -> Result<Length> {
        self.lengths
            .remove(&EdgeKey::new(a, b))
            .ok_or(Error::MissingEdge { a, b })
    }

    /// Cached length of edge `(a, b)`, if it is a tour edge.
    pub fn get(&self, a: PointId, b: PointId) -> Option<Length> {
        self.lengths.get(&EdgeKey::new(a, b)).copied()
    }

    /// Returns `true` if edge `(a, b)` is cached.
    pub fn contains(&self, a: PointId, b: PointId) -> bool {
        self.lengths.contains_key(&EdgeKey::new(a, b))
    }

    /// Cached length if present, otherwise computed directly without caching.
    pub fn compute_length(&self, a: PointId, b: PointId) -> Length {
        self.get(a, b).unwrap_or_else(|| self.calculator.length(a, b))
    }

    /// Number of cached edges.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// The calculator backing uncached lookups.
    pub fn calculator(&self) -> &DistanceCalculator<'a> {
        &self.calculator
    }
}
