//! Nearest-neighbor initial tour.
//!
//! Starting from a given point, always visit the nearest unvisited point.
//!
//! # Complexity
//!
//! O(n²) where n = number of points.
//!
//! # Reference
//!
//! The simplest constructive heuristic for the TSP. Tours are typically
//! around 25% above optimal, which leaves 2-opt far less work than a
//! random permutation.

use crate::distance::DistanceCalculator;
use crate::models::PointId;

/// Builds a permutation of all points greedily from `start`.
///
/// Ties go to the lowest point id. Returns an empty vector if there are no
/// points, and starts from point 0 if `start` is out of range.
///
/// # Examples
///
/// ```
/// use u_twoopt::distance::DistanceCalculator;
/// use u_twoopt::constructive::nearest_neighbor_tour;
///
/// let x = [0.0, 3.0, 1.0, 2.0];
/// let y = [0.0, 0.0, 0.0, 0.0];
/// let calc = DistanceCalculator::new(&x, &y).unwrap();
/// assert_eq!(nearest_neighbor_tour(&calc, 0), vec![0, 2, 3, 1]);
/// ```
pub fn nearest_neighbor_tour(calculator: &DistanceCalculator<'_>, start: PointId) -> Vec<PointId> {
    let n = calculator.size();
    if n == 0 {
        return Vec::new();
    }
    let start = if start < n { start } else { 0 };

    let mut unvisited: Vec<PointId> = (0..n).filter(|&p| p != start).collect();
    let mut tour = Vec::with_capacity(n);
    tour.push(start);
    let mut current = start;

    while let Some(next) = calculator.nearest(current, &unvisited) {
        unvisited.retain(|&p| p != next);
        tour.push(next);
        current = next;
    }
    tour
}
