//! First-improvement 2-opt neighborhood scans.
//!
//! # Algorithm
//!
//! For two non-adjacent tour edges `(a1, b1)` and `(a2, b2)`, both oriented in
//! traversal direction, compute the change from reconnecting them:
//!
//! ```text
//! delta = d(a1, a2) + d(b1, b2) - d(a1, b1) - d(a2, b2)
//! ```
//!
//! If delta < 0 the exchange shortens the tour. The scans below return the
//! first such exchange in a fixed order instead of the best one, so a run is
//! reproducible. Ties are rejected, which keeps the climb from cycling on
//! plateaus.
//!
//! Two scans cover the same neighborhood:
//!
//! - [`first_improvement`] walks pairs of a [`SegmentList`] in reverse list order
//! - [`first_improvement_swap`] pins point `i` and walks `j` along the tour
//!
//! # Complexity
//!
//! O(n²) per scan. Candidate edges are priced through
//! [`LengthMap::compute_length`], so the cache never grows past the n live edges.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::LengthMap;
use crate::models::{Move, Segment, Swap};
use crate::tour::{SegmentList, Tour};

/// Returns the first improving reconnection of two compatible segments.
///
/// Pairs are visited with `s1` running from the last segment down to the
/// second, and `s2` from just before `s1` down to the first. For each pair the
/// candidate edges are `(s1.a, s2.a)` and `(s1.b, s2.b)`.
///
/// Returns `None` at a 2-opt local optimum.
///
/// # Examples
///
/// ```
/// use u_twoopt::distance::DistanceCalculator;
/// use u_twoopt::local_search::first_improvement;
/// use u_twoopt::tour::{SegmentList, Tour};
///
/// // Square visited corner-to-corner: 0 -> 2 -> 1 -> 3 crosses itself.
/// let x = [0.0, 0.0, 10.0, 10.0];
/// let y = [0.0, 10.0, 10.0, 0.0];
/// let calc = DistanceCalculator::new(&x, &y).unwrap();
/// let tour = Tour::new(calc, &[0, 2, 1, 3]).unwrap();
/// let segments = SegmentList::from_tour(&tour);
///
/// let mv = first_improvement(&segments, tour.length_map()).unwrap();
/// assert_eq!(mv.improvement, 8); // 48 -> 40
/// ```
pub fn first_improvement(segments: &SegmentList, lengths: &LengthMap<'_>) -> Option<Move> {
    let segments = segments.as_slice();
    for i in (1..segments.len()).rev() {
        let s1 = segments[i];
        for k in (0..i).rev() {
            let s2 = segments[k];
            if !s1.compatible(&s2) {
                continue;
            }
            let current = s1.length + s2.length;
            let new1 = Segment::new(s1.a, s2.a, lengths);
            if new1.length >= current {
                continue;
            }
            let new2 = Segment::new(s1.b, s2.b, lengths);
            if let Some(mv) = Move::reconnect(s1, s2, new1, new2) {
                return Some(mv);
            }
        }
    }
    None
}

/// Returns the first improving point-pinned exchange.
///
/// For each point `i` in id order, `j` starts two steps past `i` and follows
/// the successor mapping until the edge `(j, next(j))` would end at `i`.
/// Every rejected candidate advances `j`, so the scan always terminates.
///
/// Returns `None` at a 2-opt local optimum.
pub fn first_improvement_swap(tour: &Tour<'_>) -> Option<Swap> {
    let lengths = tour.length_map();
    for i in 0..tour.len() {
        let ni = tour.successor(i);
        let first_old = tour.length_from(i);
        let mut j = tour.successor(ni);
        while tour.successor(j) != i {
            let nj = tour.successor(j);
            let current = first_old + tour.length_from(j);
            let mut new = lengths.compute_length(i, j);
            if new < current {
                new += lengths.compute_length(ni, nj);
                if new < current {
                    return Some(Swap {
                        i,
                        j,
                        improvement: current - new,
                    });
                }
            }
            j = nj;
        }
    }
    None
}
