//! 2-opt neighborhood search.
//!
//! - [`first_improvement`]: segment-pair scan over a [`SegmentList`](crate::tour::SegmentList)
//! - [`first_improvement_swap`]: point-pinned scan directly over a [`Tour`](crate::tour::Tour)

mod two_opt;

pub use two_opt::{first_improvement, first_improvement_swap};
