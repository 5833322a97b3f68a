//! Fixed two-slot neighbor records.

use crate::error::{Error, Result};
use crate::models::{PointId, EMPTY};

/// The two unordered neighbor slots of one point.
///
/// An unoccupied slot holds [`EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Adjacency([PointId; 2]);

impl Adjacency {
    pub(crate) const VACANT: Self = Self([EMPTY, EMPTY]);

    /// Attaches `neighbor` to the first free slot of `point`.
    ///
    /// Both slots taken means `point` would get a third neighbor.
    pub(crate) fn fill(&mut self, point: PointId, neighbor: PointId) -> Result<()> {
        match self.0.iter_mut().find(|slot| **slot == EMPTY) {
            Some(slot) => {
                *slot = neighbor;
                Ok(())
            }
            None => Err(Error::SlotOverflow { point, neighbor }),
        }
    }

    /// Clears every slot holding `neighbor`. No-op if none does.
    pub(crate) fn vacate(&mut self, neighbor: PointId) {
        for slot in self.0.iter_mut() {
            if *slot == neighbor {
                *slot = EMPTY;
            }
        }
    }

    /// The neighbor in the slot not holding `neighbor`.
    pub(crate) fn other(&self, neighbor: PointId) -> PointId {
        if self.0[0] == neighbor {
            self.0[1]
        } else {
            self.0[0]
        }
    }

    pub(crate) fn first(&self) -> PointId {
        self.0[0]
    }

    pub(crate) fn contains(&self, neighbor: PointId) -> bool {
        neighbor != EMPTY && self.0.contains(&neighbor)
    }

    pub(crate) fn slots(&self) -> [PointId; 2] {
        self.0
    }
}
