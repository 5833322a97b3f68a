//! Edge-length summary.

use serde::Serialize;

use super::Tour;
use crate::models::Length;

/// Shortest, longest, and mean edge length of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TourStats {
    /// Number of points (and edges).
    pub points: usize,
    /// Total tour length.
    pub total: Length,
    /// Shortest edge.
    pub shortest: Length,
    /// Longest edge.
    pub longest: Length,
    /// Mean edge length.
    pub mean: f64,
}

impl TourStats {
    /// Summarizes the cached edge lengths of `tour`.
    pub fn of(tour: &Tour<'_>) -> Self {
        let points = tour.len();
        let mut total = 0;
        let mut shortest = Length::MAX;
        let mut longest = 0;
        for p in 0..points {
            let l = tour.length_from(p);
            total += l;
            shortest = shortest.min(l);
            longest = longest.max(l);
        }
        Self {
            points,
            total,
            shortest,
            longest,
            mean: total as f64 / points as f64,
        }
    }
}
