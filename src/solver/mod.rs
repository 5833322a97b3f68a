//! Hill-climb driver.
//!
//! - [`SolverConfig`]: scan strategy, checkpoint period, and run limits
//! - [`HillClimber`]: applies first-improvement moves until a local optimum
//! - [`check_tour`]: cycle, segment, and length verification run at checkpoints
//! - [`CheckpointWriter`]: persistence of verified orderings

mod checkpoint;
mod config;
mod runner;
mod verify;

pub use checkpoint::{
    Checkpoint, CheckpointWriter, FileWriter, MemoryWriter, NullWriter, SavedCheckpoint,
};
pub use config::{SearchStrategy, SolverConfig};
pub use runner::{HillClimbResult, HillClimber, Termination};
pub use verify::{check_tour, valid_cycle, InvariantViolation};
