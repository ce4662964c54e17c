//! Ordered chain of pod filters run before a deck is built.

use crate::filters::{DistanceFilter, TagOverlapFilter};
use crate::traits::Filter;
use anyhow::{Context, Result};
use pod_model::Pod;
use sources::UserContext;
use tracing::debug;

/// Pod filters applied one after another, each seeing only what the
/// previous one kept.
///
/// ```ignore
/// let deck_pods = FilterPipeline::standard().apply(pods, &context)?;
/// ```
#[derive(Default)]
pub struct FilterPipeline {
    stages: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag overlap, then the search radius.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(TagOverlapFilter)
            .add_filter(DistanceFilter)
    }

    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.stages.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in run order
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage over `pods`. The first failing stage aborts the run
    /// and is named in the error.
    pub fn apply(&self, pods: Vec<Pod>, context: &UserContext) -> Result<Vec<Pod>> {
        self.stages.iter().try_fold(pods, |pods, stage| {
            let before = pods.len();
            let kept = stage
                .apply(pods, context)
                .with_context(|| format!("{} failed", stage.name()))?;
            debug!("{}: {} -> {} pods", stage.name(), before, kept.len());
            Ok(kept)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct Exploding;

    impl Filter for Exploding {
        fn name(&self) -> &str {
            "Exploding"
        }

        fn apply(&self, _pods: Vec<Pod>, _context: &UserContext) -> Result<Vec<Pod>> {
            bail!("boom")
        }
    }

    /// Drops every pod whose id is in the list
    struct DropIds(&'static [&'static str]);

    impl Filter for DropIds {
        fn name(&self) -> &str {
            "DropIds"
        }

        fn apply(&self, pods: Vec<Pod>, _context: &UserContext) -> Result<Vec<Pod>> {
            Ok(pods
                .into_iter()
                .filter(|pod| !self.0.contains(&pod.id.as_str()))
                .collect())
        }
    }

    fn ids(pods: &[Pod]) -> Vec<&str> {
        pods.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_no_stages_passes_pods_through() {
        let pods = vec![Pod::new("x", "X"), Pod::new("y", "Y")];
        let kept = FilterPipeline::new().apply(pods, &UserContext::new()).unwrap();
        assert_eq!(ids(&kept), vec!["x", "y"]);
    }

    #[test]
    fn test_stages_compose_and_keep_server_order() {
        let pipeline = FilterPipeline::new()
            .add_filter(DropIds(&["b"]))
            .add_filter(TagOverlapFilter);
        let context = UserContext::new().with_interests(["chess"]);

        let pods = vec![
            Pod::new("c", "Blitz").with_tags(["chess"]),
            Pod::new("b", "Banned").with_tags(["chess"]),
            Pod::new("d", "Knitting").with_tags(["crafts"]),
            Pod::new("a", "Openings").with_tags(["chess", "books"]),
        ];

        let kept = pipeline.apply(pods, &context).unwrap();
        assert_eq!(ids(&kept), vec!["c", "a"]);
    }

    #[test]
    fn test_failing_stage_is_named() {
        let pipeline = FilterPipeline::new()
            .add_filter(DropIds(&[]))
            .add_filter(Exploding);

        let err = pipeline
            .apply(vec![Pod::new("1", "One")], &UserContext::new())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Exploding failed"));
    }

    #[test]
    fn test_standard_runs_tags_then_radius() {
        let pipeline = FilterPipeline::standard();
        assert_eq!(pipeline.names(), vec!["TagOverlapFilter", "DistanceFilter"]);
        assert!(FilterPipeline::new().is_empty());

        // Without a position the radius stage keeps everything the tag stage kept
        let context = UserContext::new()
            .with_interests(["art"])
            .with_max_distance(10.0);
        let pods = vec![Pod::new("1", "Mural").with_tags(["art"])];
        assert_eq!(pipeline.apply(pods, &context).unwrap().len(), 1);
    }
}
