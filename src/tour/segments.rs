//! Parallel list of directed tour edges.

use super::Tour;
use crate::error::{Error, Result};
use crate::models::{Length, Move, Segment};

/// One directed [`Segment`] per tour edge, kept in step with a [`Tour`].
///
/// The list order is the scan order of the segment-pair search, so it is
/// only ever changed by removing the two replaced segments and appending the
/// two new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentList {
    segments: Vec<Segment>,
}

impl SegmentList {
    /// Creates one segment `(p, successor(p))` per point, in the order of the
    /// permutation the tour was built from.
    pub fn from_tour(tour: &Tour<'_>) -> Self {
        let segments = tour
            .initial_order()
            .iter()
            .map(|&p| Segment {
                a: p,
                b: tour.successor(p),
                length: tour.length_from(p),
            })
            .collect();
        Self { segments }
    }

    /// Mirrors a move already applied to `tour`: removes the two old segments,
    /// appends the two new ones, then realigns every segment with the tour's
    /// rebuilt successor mapping.
    ///
    /// Both old segments are located before anything is removed, so on error
    /// the list is unchanged.
    pub fn apply_move(&mut self, mv: &Move, tour: &Tour<'_>) -> Result<()> {
        let [first, second] = mv.removed.map(|old| {
            self.segments
                .iter()
                .position(|s| s.key() == old.key())
                .ok_or(Error::MissingSegment { a: old.a, b: old.b })
        });
        let (first, second) = (first?, second?);
        if first == second {
            return Err(Error::InvalidMove(format!(
                "segment ({}, {}) removed twice",
                mv.removed[0].a, mv.removed[0].b
            )));
        }
        self.segments.remove(first.max(second));
        self.segments.remove(first.min(second));
        self.segments.extend_from_slice(&mv.added);
        self.align(tour);
        Ok(())
    }

    /// Flips, in place, every segment recorded against traversal direction.
    pub fn align(&mut self, tour: &Tour<'_>) {
        for s in self.segments.iter_mut() {
            if s.a == tour.successor(s.b) {
                s.reverse();
            }
        }
    }

    /// Returns `true` if every segment satisfies `b == successor(a)`.
    pub fn is_aligned(&self, tour: &Tour<'_>) -> bool {
        self.segments.iter().all(|s| s.b == tour.successor(s.a))
    }

    /// Sum of the segment lengths.
    pub fn total_length(&self) -> Length {
        self.segments.iter().map(|s| s.length).sum()
    }

    /// The segments in scan order.
    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the list holds no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceCalculator;
    use crate::models::Swap;

    static X: [f64; 6] = [0.0, 0.0, 10.0, 10.0, 20.0, 20.0];
    static Y: [f64; 6] = [0.0, 10.0, 10.0, 0.0, 0.0, 10.0];

    fn tour(initial: &[usize]) -> Tour<'static> {
        let calc = DistanceCalculator::new(&X[..initial.len()], &Y[..initial.len()])
            .expect("valid");
        Tour::new(calc, initial).expect("valid")
    }

    #[test]
    fn test_from_tour_aligned() {
        let t = tour(&[0, 2, 4, 1, 3, 5]);
        let list = SegmentList::from_tour(&t);
        assert_eq!(list.len(), 6);
        assert!(list.is_aligned(&t));
        assert_eq!(list.total_length(), t.total_length());
    }

    #[test]
    fn test_apply_move_realigns() {
        let mut t = tour(&[0, 2, 4, 1, 3, 5]);
        let mut list = SegmentList::from_tour(&t);
        let i = t.order()[1];
        let mv = t.move_for_swap(&Swap {
            i,
            j: t.successor(t.successor(i)),
            improvement: 0,
        });
        t.apply_move(&mv).expect("valid move");
        list.apply_move(&mv, &t).expect("segments present");

        assert_eq!(list.len(), 6);
        assert!(list.is_aligned(&t));
        assert_eq!(list.total_length(), t.total_length());
        let tail = &list.as_slice()[4..];
        assert_eq!(tail[0].key(), mv.added[0].key());
        assert_eq!(tail[1].key(), mv.added[1].key());
    }

    #[test]
    fn test_from_tour_keeps_construction_order() {
        let t = tour(&[0, 2, 4, 1, 3, 5]);
        let list = SegmentList::from_tour(&t);
        let expected: Vec<Segment> = [0, 2, 4, 1, 3, 5]
            .into_iter()
            .map(|p| Segment {
                a: p,
                b: t.successor(p),
                length: t.length_from(p),
            })
            .collect();
        assert_eq!(list.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_align_flips_reversed_segment() {
        let t = tour(&[0, 1, 2, 3]);
        let mut list = SegmentList::from_tour(&t);
        list.segments[0].reverse();
        assert!(!list.is_aligned(&t));
        list.align(&t);
        assert!(list.is_aligned(&t));
    }

    #[test]
    fn test_apply_move_missing_segment() {
        let t = tour(&[0, 1, 2, 3]);
        let mut list = SegmentList::from_tour(&t);
        let lengths = t.length_map();
        let mv = Move {
            improvement: 1,
            removed: [Segment::new(0, 2, lengths), Segment::new(1, 3, lengths)],
            added: [Segment::new(0, 1, lengths), Segment::new(2, 3, lengths)],
        };
        let err = list.apply_move(&mv, &t).unwrap_err();
        assert!(matches!(err, Error::MissingSegment { a: 0, b: 2 }));
    }

    #[test]
    fn test_apply_move_second_missing_leaves_list_unchanged() {
        let t = tour(&[0, 1, 2, 3]);
        let mut list = SegmentList::from_tour(&t);
        let before = list.clone();
        let lengths = t.length_map();
        let mv = Move {
            improvement: 1,
            removed: [Segment::new(0, 1, lengths), Segment::new(1, 3, lengths)],
            added: [Segment::new(0, 3, lengths), Segment::new(1, 2, lengths)],
        };
        let err = list.apply_move(&mv, &t).unwrap_err();
        assert!(matches!(err, Error::MissingSegment { a: 1, b: 3 }));
        assert_eq!(list, before);
    }
}
