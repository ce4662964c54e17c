//! Filter implementations for the pod pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod distance;
pub mod tag_overlap;

// Re-export for convenience
pub use distance::DistanceFilter;
pub use tag_overlap::TagOverlapFilter;
