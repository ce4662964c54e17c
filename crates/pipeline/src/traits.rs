//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to the fetched pods before they
//! reach the swipe deck.

use anyhow::Result;
use pod_model::Pod;
use sources::UserContext;

/// Core trait for filtering pods.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across tasks
/// - Filters take ownership of the Vec<Pod> and return a filtered Vec
/// - Filters must preserve the relative order of the pods they keep
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of pods.
    ///
    /// # Arguments
    /// * `pods` - The pods to filter (takes ownership)
    /// * `context` - User context containing interests and position
    ///
    /// # Returns
    /// * `Ok(Vec<Pod>)` - The pods that passed, in input order
    /// * `Err` - If filtering fails
    fn apply(&self, pods: Vec<Pod>, context: &UserContext) -> Result<Vec<Pod>>;
}
