//! Pipeline for filtering and annotating pods before they reach the deck.
//!
//! This crate provides:
//! - Filter trait and implementations for pod filtering
//! - FilterPipeline for composing filters
//! - CardAnnotator for computing per-card display details
//!
//! ## Architecture
//! The pipeline processes pods in stages:
//! 1. Filters remove pods the user should not see (no shared tag, too far)
//! 2. CardAnnotator computes distance and schedule labels for the rest
//! 3. The surviving pods become the swipe deck, in server order
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{CardAnnotator, FilterPipeline};
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(TagOverlapFilter)
//!     .add_filter(DistanceFilter);
//!
//! let filtered = pipeline.apply(pods, &context)?;
//! let details = CardAnnotator::new().annotate(&filtered, &context);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod annotate;
pub mod geo;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use annotate::{format_distance, format_schedule, CardAnnotator, CardDetails};
pub use geo::distance_meters;
