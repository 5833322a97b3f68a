//! 2-opt exchange descriptions.

use serde::{Deserialize, Serialize};

use super::{Length, PointId, Segment};

/// A 2-opt exchange: two tour edges removed, two edges added.
///
/// `improvement` is the strict length reduction
/// `removed[0].length + removed[1].length - added[0].length - added[1].length`,
/// always greater than zero for a move produced by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Length reduction gained by applying this move.
    pub improvement: Length,
    /// The two tour edges to break.
    pub removed: [Segment; 2],
    /// The two edges that reconnect the resulting paths.
    pub added: [Segment; 2],
}

impl Move {
    /// Builds the move reconnecting `s1 = (a1, b1)` and `s2 = (a2, b2)` as
    /// `(a1, a2)` and `(b1, b2)`.
    ///
    /// Returns `None` unless the reconnection is strictly shorter.
    pub fn reconnect(s1: Segment, s2: Segment, new1: Segment, new2: Segment) -> Option<Self> {
        let old = s1.length + s2.length;
        let new = new1.length + new2.length;
        (new < old).then(|| Self {
            improvement: old - new,
            removed: [s1, s2],
            added: [new1, new2],
        })
    }

    /// Sum of the removed edge lengths.
    pub fn removed_length(&self) -> Length {
        self.removed[0].length + self.removed[1].length
    }

    /// Sum of the added edge lengths.
    pub fn added_length(&self) -> Length {
        self.added[0].length + self.added[1].length
    }
}

/// A point-pinned 2-opt exchange.
///
/// Replaces edges `(i, next(i))` and `(j, next(j))` with `(i, j)` and
/// `(next(i), next(j))`. Converted into a [`Move`] by
/// [`Tour::move_for_swap`](crate::tour::Tour::move_for_swap) before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    /// First pinned point.
    pub i: PointId,
    /// Second pinned point.
    pub j: PointId,
    /// Length reduction gained by applying this swap.
    pub improvement: Length,
}
