//! Tour integrity checks run at checkpoints.

use serde::Serialize;
use thiserror::Error;

use crate::models::{Length, PointId, EMPTY};
use crate::tour::{SegmentList, Tour, START};

/// A broken tour invariant found at a checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum InvariantViolation {
    /// The segment list lost or gained segments.
    #[error("invalid segment count: actual {actual}, expected {expected}")]
    SegmentCount {
        /// Segments in the list.
        actual: usize,
        /// Points in the tour.
        expected: usize,
    },

    /// A point lacks two distinct, mutually linked neighbors.
    #[error("point {point} does not have two distinct linked neighbors")]
    Degree {
        /// The offending point.
        point: PointId,
    },

    /// The adjacency graph is not one cycle through all points.
    #[error("invalid cycle: walk from point 0 closed after {visited} of {expected} points")]
    BrokenCycle {
        /// Points visited before the walk closed or repeated.
        visited: usize,
        /// Points in the tour.
        expected: usize,
    },

    /// The successor mapping disagrees with the adjacency slots.
    #[error("successor of point {point} is not one of its neighbors")]
    Successor {
        /// The offending point.
        point: PointId,
    },

    /// A segment is not oriented along the successor mapping.
    #[error("segment ({a}, {b}) is not aligned with the tour")]
    Misaligned {
        /// Segment start.
        a: PointId,
        /// Segment end.
        b: PointId,
    },

    /// A length recomputed from scratch differs from the tracked length.
    #[error("tour length mismatch: tracked {expected}, recomputed {actual}")]
    Length {
        /// Initial length minus accepted improvements.
        expected: Length,
        /// Independently recomputed length.
        actual: Length,
    },
}

/// Returns `true` if the adjacency graph is a single cycle through all n points.
///
/// Walks the neighbor slots from [`START`], independently of the successor
/// mapping, and requires the walk to return to [`START`] after exactly n
/// distinct points.
pub fn valid_cycle(tour: &Tour<'_>) -> bool {
    check_cycle(tour).is_ok()
}

/// Checks structure, segment list, and length of a tour.
///
/// `segments` is checked when present. `expected_length` is compared against
/// both the cached total and a from-scratch recomputation.
pub fn check_tour(
    tour: &Tour<'_>,
    segments: Option<&SegmentList>,
    expected_length: Length,
) -> Result<(), InvariantViolation> {
    if let Some(list) = segments {
        if list.len() != tour.len() {
            return Err(InvariantViolation::SegmentCount {
                actual: list.len(),
                expected: tour.len(),
            });
        }
    }
    check_cycle(tour)?;
    for p in 0..tour.len() {
        if !tour.neighbors(p).contains(&tour.successor(p)) {
            return Err(InvariantViolation::Successor { point: p });
        }
    }
    if let Some(list) = segments {
        if let Some(s) = list.as_slice().iter().find(|s| s.b != tour.successor(s.a)) {
            return Err(InvariantViolation::Misaligned { a: s.a, b: s.b });
        }
    }
    for actual in [tour.total_length(), tour.recompute_length()] {
        if actual != expected_length {
            return Err(InvariantViolation::Length {
                expected: expected_length,
                actual,
            });
        }
    }
    Ok(())
}

fn check_cycle(tour: &Tour<'_>) -> Result<(), InvariantViolation> {
    let n = tour.len();
    for p in 0..n {
        let [a, b] = tour.neighbors(p);
        let linked = |q: PointId| q != EMPTY && q != p && tour.neighbors(q).contains(&p);
        if a == b || !linked(a) || !linked(b) {
            return Err(InvariantViolation::Degree { point: p });
        }
    }

    let mut seen = vec![false; n];
    let mut prev = EMPTY;
    let mut current = START;
    let mut visited = 0;
    while !seen[current] {
        seen[current] = true;
        visited += 1;
        let [a, b] = tour.neighbors(current);
        let following = if b == prev { a } else { b };
        prev = current;
        current = following;
    }
    if current != START || visited != n {
        return Err(InvariantViolation::BrokenCycle {
            visited,
            expected: n,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceCalculator;
    use crate::models::{Move, Segment};

    // Two unit squares side by side:
    // 0=(0,0) 1=(0,10) 2=(10,10) 3=(10,0) 4=(20,0) 5=(20,10)
    static X: [f64; 6] = [0.0, 0.0, 10.0, 10.0, 20.0, 20.0];
    static Y: [f64; 6] = [0.0, 10.0, 10.0, 0.0, 0.0, 10.0];

    fn tour(initial: &[PointId]) -> Tour<'static> {
        let calc = DistanceCalculator::new(&X, &Y).expect("valid");
        Tour::new(calc, initial).expect("valid")
    }

    #[test]
    fn test_fresh_tour_is_valid() {
        let t = tour(&[0, 1, 2, 5, 4, 3]);
        assert!(valid_cycle(&t));
        let list = SegmentList::from_tour(&t);
        assert!(check_tour(&t, Some(&list), t.total_length()).is_ok());
        assert!(check_tour(&t, None, t.total_length()).is_ok());
    }

    #[test]
    fn test_split_move_breaks_cycle() {
        // Reconnecting (a1, b2) and (b1, a2) instead of (a1, a2) and (b1, b2)
        // splits the tour into two triangles.
        let mut t = tour(&[0, 1, 2, 5, 4, 3]);
        let order = t.order();
        let (a1, b1, a2, b2) = (order[1], order[2], order[4], order[5]);
        let lengths = t.length_map();
        let split = Move {
            improvement: 0,
            removed: [Segment::new(a1, b1, lengths), Segment::new(a2, b2, lengths)],
            added: [Segment::new(a1, b2, lengths), Segment::new(b1, a2, lengths)],
        };
        t.apply_move(&split).expect("degree preserved");

        assert!(!valid_cycle(&t));
        assert_eq!(
            check_tour(&t, None, t.total_length()),
            Err(InvariantViolation::BrokenCycle {
                visited: 3,
                expected: 6
            })
        );
    }

    #[test]
    fn test_segment_count_mismatch() {
        let t = tour(&[0, 1, 2, 5, 4, 3]);
        let list = SegmentList::from_tour(&t);

        let calc = DistanceCalculator::new(&X[..4], &Y[..4]).expect("valid");
        let small = Tour::new(calc, &[0, 1, 2, 3]).expect("valid");
        assert_eq!(
            check_tour(&small, Some(&list), small.total_length()),
            Err(InvariantViolation::SegmentCount {
                actual: 6,
                expected: 4
            })
        );
    }

    #[test]
    fn test_length_mismatch() {
        let t = tour(&[0, 1, 2, 5, 4, 3]);
        let len = t.total_length();
        assert_eq!(
            check_tour(&t, None, len + 1),
            Err(InvariantViolation::Length {
                expected: len + 1,
                actual: len
            })
        );
    }
}
