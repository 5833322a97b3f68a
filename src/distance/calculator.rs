//! Rounded Euclidean distance over external coordinate arrays.

use crate::error::{Error, Result};
use crate::models::{Length, PointId};

/// Computes edge lengths from borrowed coordinate arrays.
///
/// Lengths are the Euclidean distance rounded half-up (add 0.5, truncate),
/// which keeps every length integral and every run deterministic. Nothing is
/// cached; each call is O(1).
///
/// # Examples
///
/// ```
/// use u_twoopt::distance::DistanceCalculator;
///
/// let x = [0.0, 3.0, 0.0];
/// let y = [0.0, 4.0, 1.4];
/// let calc = DistanceCalculator::new(&x, &y).unwrap();
/// assert_eq!(calc.length(0, 1), 5);
/// assert_eq!(calc.length(0, 2), 1); // 1.4 rounds down
/// assert_eq!(calc.size(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DistanceCalculator<'a> {
    x: &'a [f64],
    y: &'a [f64],
}

impl<'a> DistanceCalculator<'a> {
    /// Creates a calculator over the given coordinates.
    ///
    /// Returns [`Error::CoordinateMismatch`] if the arrays differ in length.
    pub fn new(x: &'a [f64], y: &'a [f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::CoordinateMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Rounded Euclidean length between points `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of bounds.
    pub fn length(&self, a: PointId, b: PointId) -> Length {
        let dx = self.x[a] - self.x[b];
        let dy = self.y[a] - self.y[b];
        let exact = (dx * dx + dy * dy).sqrt();
        (exact + 0.5) as Length
    }

    /// Number of points.
    pub fn size(&self) -> usize {
        self.x.len()
    }

    /// Returns the candidate closest to `from`, the first one on ties.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest(&self, from: PointId, candidates: &[PointId]) -> Option<PointId> {
        candidates
            .iter()
            .copied()
            .min_by_key(|&c| self.length(from, c))
    }
}
