//! Identity and seeded random initial permutations.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::models::PointId;

/// The permutation `[0, 1, ..., n - 1]`.
pub fn identity_tour(n: usize) -> Vec<PointId> {
    (0..n).collect()
}

/// A uniformly shuffled permutation of `[0, n)`, reproducible from `seed`.
///
/// # Examples
///
/// ```
/// use u_twoopt::constructive::random_tour;
///
/// let a = random_tour(10, 42);
/// assert_eq!(a, random_tour(10, 42));
/// let mut sorted = a.clone();
/// sorted.sort_unstable();
/// assert_eq!(sorted, (0..10).collect::<Vec<_>>());
/// ```
pub fn random_tour(n: usize, seed: u64) -> Vec<PointId> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tour = identity_tour(n);
    tour.shuffle(&mut rng);
    tour
}
