//! Initial tours for the 2-opt climb.
//!
//! - [`identity_tour`]: points in id order
//! - [`random_tour`]: seeded uniform shuffle
//! - [`nearest_neighbor_tour`]: greedy nearest-neighbor, O(n²)

mod nearest_neighbor;
mod permutation;

pub use nearest_neighbor::nearest_neighbor_tour;
pub use permutation::{identity_tour, random_tour};
