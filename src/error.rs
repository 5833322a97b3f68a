//! Error types for tour construction, mutation, and solving.

use thiserror::Error;

use crate::models::PointId;

/// Main error type for u-twoopt operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A tour needs at least three points to have two distinct neighbors per point.
    #[error("tour needs at least 3 points, got {count}")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
    },

    /// The x and y coordinate arrays differ in length.
    #[error("coordinate arrays differ in length: {x} x-values, {y} y-values")]
    CoordinateMismatch {
        /// Number of x-coordinates.
        x: usize,
        /// Number of y-coordinates.
        y: usize,
    },

    /// The initial ordering is not a permutation of `[0, n)`.
    #[error("initial ordering is not a permutation: {0}")]
    NotAPermutation(String),

    /// A point would receive a third neighbor.
    #[error("structural corruption: point {point} has no free slot for neighbor {neighbor}")]
    SlotOverflow {
        /// The point whose slots are full.
        point: PointId,
        /// The neighbor that could not be attached.
        neighbor: PointId,
    },

    /// An edge expected to exist in the tour does not.
    #[error("edge ({a}, {b}) is not part of the tour")]
    MissingEdge {
        /// First endpoint.
        a: PointId,
        /// Second endpoint.
        b: PointId,
    },

    /// A move whose added edges do not reconnect the removed edges' endpoints.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// A removed segment could not be found in the segment list.
    #[error("segment ({a}, {b}) is not in the segment list")]
    MissingSegment {
        /// Segment start.
        a: PointId,
        /// Segment end.
        b: PointId,
    },

    /// Invalid solver configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Checkpoint persistence failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for u-twoopt operations.
pub type Result<T> = std::result::Result<T, Error>;
