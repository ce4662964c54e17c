//! Where decisions end up.

use anyhow::Result;
use async_trait::async_trait;
use deck::{Decision, Outcome};
use sources::HttpPodClient;

/// Receives one decision at a time from the dispatcher worker.
///
/// Errors are reported back to the worker, which logs and drops them.
#[async_trait]
pub trait DecisionSink: Send + Sync {
    async fn report(&self, decision: &Decision) -> Result<()>;
}

/// Route on the pod server for an outcome.
pub fn endpoint_for(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Accept => "savePod",
        Outcome::Reject => "nopePod",
    }
}

/// Posts `{ "pod": <pod> }` to `/savePod` or `/nopePod`.
#[derive(Clone, Debug)]
pub struct HttpDecisionSink {
    client: HttpPodClient,
}

impl HttpDecisionSink {
    pub fn new(client: HttpPodClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DecisionSink for HttpDecisionSink {
    async fn report(&self, decision: &Decision) -> Result<()> {
        self.client
            .post_pod(endpoint_for(decision.outcome), &decision.pod)
            .await?;
        Ok(())
    }
}
