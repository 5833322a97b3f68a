//! # u-twoopt
//!
//! 2-opt local search for closed tours over planar points: a cyclic
//! adjacency tour with an incremental edge-length cache, first-improvement
//! neighborhood scans, and a verified hill-climb driver with checkpoints.
//!
//! ## Modules
//!
//! - [`models`]: Point ids, lengths, segments, and moves
//! - [`distance`]: Rounded Euclidean lengths and the live-edge length cache
//! - [`tour`]: Adjacency tour, parallel segment list, tour statistics
//! - [`local_search`]: First-improvement 2-opt scans
//! - [`constructive`]: Initial tours (identity, seeded random, nearest neighbor)
//! - [`solver`]: Hill-climb loop, configuration, verification, checkpoint writers
//! - [`logging`]: `tracing` subscriber setup
//!
//! ## Example
//!
//! ```
//! use u_twoopt::constructive::nearest_neighbor_tour;
//! use u_twoopt::distance::DistanceCalculator;
//! use u_twoopt::solver::{HillClimber, NullWriter, SolverConfig};
//! use u_twoopt::tour::Tour;
//!
//! let x = [0.0, 30.0, 10.0, 20.0, 0.0, 30.0];
//! let y = [0.0, 0.0, 10.0, 10.0, 20.0, 20.0];
//! let calc = DistanceCalculator::new(&x, &y)?;
//! let initial = nearest_neighbor_tour(&calc, 0);
//! let mut tour = Tour::new(calc, &initial)?;
//!
//! let result = HillClimber::run(&mut tour, &SolverConfig::default(), &mut NullWriter)?;
//! assert!(result.final_length <= result.initial_length);
//! assert_eq!(result.final_length, tour.recompute_length());
//! # Ok::<(), u_twoopt::Error>(())
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod local_search;
pub mod logging;
pub mod models;
pub mod solver;
pub mod tour;

pub use error::{Error, Result};
