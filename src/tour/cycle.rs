//! Cyclic adjacency tour with a derived successor mapping.

use super::adjacency::Adjacency;
use crate::distance::{DistanceCalculator, LengthMap};
use crate::error::{Error, Result};
use crate::models::{Length, Move, PointId, Segment, Swap, EMPTY};

/// Point from which traversal order and successor direction are derived.
pub const START: PointId = 0;

/// A closed tour over n points stored as an undirected degree-2 graph.
///
/// Each point keeps two unordered neighbor slots. The successor mapping is
/// derived from the slots by walking the cycle once from [`START`], and is
/// rebuilt from scratch after every move: a 2-opt exchange reverses one of
/// the two path fragments, and which one depends on where [`START`] lies.
///
/// The tour owns its [`LengthMap`], which always holds exactly the n live
/// edges.
///
/// # Examples
///
/// ```
/// use u_twoopt::distance::DistanceCalculator;
/// use u_twoopt::tour::Tour;
///
/// let x = [0.0, 0.0, 10.0, 10.0];
/// let y = [0.0, 10.0, 10.0, 0.0];
/// let calc = DistanceCalculator::new(&x, &y).unwrap();
/// let tour = Tour::new(calc, &[0, 1, 2, 3]).unwrap();
/// assert_eq!(tour.len(), 4);
/// assert_eq!(tour.total_length(), 40);
/// assert_eq!(tour.order().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Tour<'a> {
    lengths: LengthMap<'a>,
    adjacency: Vec<Adjacency>,
    next: Vec<PointId>,
    initial: Vec<PointId>,
}

impl<'a> Tour<'a> {
    /// Builds the tour visiting `initial` in order and closing back to its first point.
    ///
    /// Returns an error if fewer than 3 points are given, or if `initial` is not
    /// a permutation of `[0, n)` where n is the number of coordinates.
    pub fn new(calculator: DistanceCalculator<'a>, initial: &[PointId]) -> Result<Self> {
        check_permutation(initial, calculator.size())?;

        let n = initial.len();
        let mut tour = Self {
            lengths: LengthMap::new(calculator, initial),
            adjacency: vec![Adjacency::VACANT; n],
            next: vec![EMPTY; n],
            initial: initial.to_vec(),
        };
        let mut prev = initial[n - 1];
        for &p in initial {
            tour.create_adjacency(p, prev)?;
            prev = p;
        }
        tour.rebuild_successors();
        Ok(tour)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    /// Always `false`: a tour has at least 3 points.
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// The point following `p` in traversal direction.
    pub fn successor(&self, p: PointId) -> PointId {
        self.next[p]
    }

    /// The two neighbor slots of `p`.
    pub fn neighbors(&self, p: PointId) -> [PointId; 2] {
        self.adjacency[p].slots()
    }

    /// The permutation the tour was built from.
    pub fn initial_order(&self) -> &[PointId] {
        &self.initial
    }

    /// The edge-length cache.
    pub fn length_map(&self) -> &LengthMap<'a> {
        &self.lengths
    }

    /// Length of the edge from `p` to its successor.
    pub fn length_from(&self, p: PointId) -> Length {
        self.lengths.compute_length(p, self.next[p])
    }

    /// Full cyclic sequence starting at [`START`].
    pub fn order(&self) -> Vec<PointId> {
        let mut ordered = Vec::with_capacity(self.len());
        let mut current = START;
        loop {
            ordered.push(current);
            current = self.next[current];
            if current == START || current == EMPTY || ordered.len() == self.len() {
                break;
            }
        }
        ordered
    }

    /// Sum of the cached lengths of all tour edges.
    ///
    /// Points cut off from [`START`] by a broken cycle have no successor and
    /// contribute nothing.
    pub fn total_length(&self) -> Length {
        self.linked_points().map(|p| self.length_from(p)).sum()
    }

    /// Tour length recomputed from coordinates, bypassing the cache.
    pub fn recompute_length(&self) -> Length {
        let calc = self.lengths.calculator();
        self.linked_points()
            .map(|p| calc.length(p, self.next[p]))
            .sum()
    }

    fn linked_points(&self) -> impl Iterator<Item = PointId> + '_ {
        (0..self.len()).filter(|&p| self.next[p] != EMPTY)
    }

    /// Expresses a point-pinned swap as the equivalent edge exchange:
    /// `(i, next(i))` and `(j, next(j))` replaced by `(i, j)` and `(next(i), next(j))`.
    pub fn move_for_swap(&self, swap: &Swap) -> Move {
        let (i, j) = (swap.i, swap.j);
        let (ni, nj) = (self.next[i], self.next[j]);
        Move {
            improvement: swap.improvement,
            removed: [
                Segment::new(i, ni, &self.lengths),
                Segment::new(j, nj, &self.lengths),
            ],
            added: [
                Segment::new(i, j, &self.lengths),
                Segment::new(ni, nj, &self.lengths),
            ],
        }
    }

    /// Applies a point-pinned swap. See [`move_for_swap`](Self::move_for_swap).
    pub fn apply_swap(&mut self, swap: &Swap) -> Result<()> {
        let mv = self.move_for_swap(swap);
        self.apply_move(&mv)
    }

    /// Removes the two edges in `mv.removed`, adds the two in `mv.added`, and
    /// rebuilds the successor mapping.
    ///
    /// The move is checked before anything is mutated: both removed edges must
    /// be in the tour, the added edges must reconnect exactly the same four
    /// endpoints with correct lengths. On error the tour is unchanged.
    pub fn apply_move(&mut self, mv: &Move) -> Result<()> {
        self.check_move(mv)?;

        for s in &mv.removed {
            self.lengths.erase(s.a, s.b)?;
        }
        for s in &mv.added {
            self.lengths.insert(s.a, s.b, s.length);
        }
        for s in &mv.removed {
            self.break_adjacency(s.a, s.b);
        }
        for s in &mv.added {
            self.create_adjacency(s.a, s.b)?;
        }
        self.rebuild_successors();
        Ok(())
    }

    fn check_move(&self, mv: &Move) -> Result<()> {
        let [r1, r2] = mv.removed;
        let [s1, s2] = mv.added;
        for r in &mv.removed {
            if !self.has_edge(r.a, r.b) || !self.lengths.contains(r.a, r.b) {
                return Err(Error::MissingEdge { a: r.a, b: r.b });
            }
        }
        if r1.key() == r2.key() {
            return Err(Error::InvalidMove(format!(
                "edge ({}, {}) removed twice",
                r1.a, r1.b
            )));
        }
        if s1.key() == s2.key() {
            return Err(Error::InvalidMove(format!(
                "edge ({}, {}) added twice",
                s1.a, s1.b
            )));
        }
        let calc = self.lengths.calculator();
        for s in &mv.added {
            if s.a == s.b || s.a >= self.len() || s.b >= self.len() {
                return Err(Error::InvalidMove(format!("bad edge ({}, {})", s.a, s.b)));
            }
            if self.has_edge(s.a, s.b) {
                return Err(Error::InvalidMove(format!(
                    "edge ({}, {}) already in tour",
                    s.a, s.b
                )));
            }
            if s.length != calc.length(s.a, s.b) {
                return Err(Error::InvalidMove(format!(
                    "edge ({}, {}) has length {}, expected {}",
                    s.a,
                    s.b,
                    s.length,
                    calc.length(s.a, s.b)
                )));
            }
        }
        let mut before = [r1.a, r1.b, r2.a, r2.b];
        let mut after = [s1.a, s1.b, s2.a, s2.b];
        before.sort_unstable();
        after.sort_unstable();
        if before != after {
            return Err(Error::InvalidMove(format!(
                "added endpoints {after:?} differ from removed endpoints {before:?}"
            )));
        }
        Ok(())
    }

    fn has_edge(&self, a: PointId, b: PointId) -> bool {
        a < self.len() && self.adjacency[a].contains(b)
    }

    fn create_adjacency(&mut self, a: PointId, b: PointId) -> Result<()> {
        self.adjacency[a].fill(a, b)?;
        self.adjacency[b].fill(b, a)
    }

    fn break_adjacency(&mut self, a: PointId, b: PointId) {
        self.adjacency[a].vacate(b);
        self.adjacency[b].vacate(a);
    }

    /// Walks the adjacency graph once from [`START`], following the first
    /// slot of [`START`]. Points off the walk keep [`EMPTY`] as successor.
    fn rebuild_successors(&mut self) {
        self.next.fill(EMPTY);
        let mut prev = START;
        let mut current = self.adjacency[START].first();
        self.next[START] = current;
        let mut visited = 1;
        while current != START && current != EMPTY && visited < self.len() {
            let following = self.adjacency[current].other(prev);
            self.next[current] = following;
            prev = current;
            current = following;
            visited += 1;
        }
    }
}

fn check_permutation(initial: &[PointId], points: usize) -> Result<()> {
    if initial.len() < 3 {
        return Err(Error::TooFewPoints {
            count: initial.len(),
        });
    }
    if initial.len() != points {
        return Err(Error::NotAPermutation(format!(
            "ordering has {} entries for {} points",
            initial.len(),
            points
        )));
    }
    let mut seen = vec![false; points];
    for &p in initial {
        if p >= points {
            return Err(Error::NotAPermutation(format!("point {p} out of range")));
        }
        if seen[p] {
            return Err(Error::NotAPermutation(format!("point {p} repeated")));
        }
        seen[p] = true;
    }
    Ok(())
}
