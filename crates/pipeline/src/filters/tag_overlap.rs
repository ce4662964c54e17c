//! Filter to keep only pods matching the user's interests.
//!
//! This is always the first filter: a pod with no tag in common with the
//! user is never shown, regardless of distance.

use crate::traits::Filter;
use anyhow::Result;
use pod_model::Pod;
use sources::UserContext;
use tracing::debug;

/// Keeps pods with at least one tag in the user's interest set.
///
/// ## Algorithm
/// Uses the HashSet in UserContext.interests for O(1) lookups per tag.
/// A user with no interests sees no pods.
pub struct TagOverlapFilter;

impl Filter for TagOverlapFilter {
    fn name(&self) -> &str {
        "TagOverlapFilter"
    }

    fn apply(&self, pods: Vec<Pod>, context: &UserContext) -> Result<Vec<Pod>> {
        let filtered: Vec<Pod> = pods
            .into_iter()
            .filter(|pod| {
                let keep = pod.shares_tag_with(&context.interests);
                if !keep {
                    debug!("Pod {} has no tag matching the user's interests", pod.id);
                }
                keep
            })
            .collect();
        Ok(filtered)
    }
}
