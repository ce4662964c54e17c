//! # Decision Dispatcher
//!
//! Decisions leave the deck immediately; reporting them to the server
//! happens in the background. The dispatcher owns an unbounded tokio channel
//! and a single worker task that forwards each decision to a
//! [`DecisionSink`], in the order they were made.
//!
//! ## Rust concept: Closing a channel by dropping the sender
//! `shutdown()` drops the sender and awaits the worker. `recv()` keeps
//! yielding buffered decisions and returns `None` only once the channel is
//! empty, so the worker exits after the last queued decision is handled.

use crate::error::DispatchError;
use crate::sink::DecisionSink;
use deck::Decision;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Counts reported by the worker when it drains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: usize,
    pub failed: usize,
}

pub struct DecisionDispatcher {
    sender: mpsc::UnboundedSender<Decision>,
    worker: JoinHandle<DispatchStats>,
}

impl DecisionDispatcher {
    /// Start the worker. Must be called from within a tokio runtime.
    pub fn spawn(sink: Arc<dyn DecisionSink>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(sink, receiver));
        Self { sender, worker }
    }

    /// Queue a decision for delivery. Never waits on the network.
    pub fn send(&self, decision: Decision) -> Result<(), DispatchError> {
        debug!("Queueing {} for pod {}", decision.outcome, decision.pod.id);
        self.sender.send(decision).map_err(|_| DispatchError::Closed)
    }

    /// Stop accepting decisions and wait until the queue is drained.
    pub async fn shutdown(self) -> Result<DispatchStats, DispatchError> {
        drop(self.sender);
        let stats = self.worker.await?;
        info!(
            "Dispatcher drained: {} delivered, {} failed",
            stats.delivered, stats.failed
        );
        Ok(stats)
    }
}

async fn run_worker(
    sink: Arc<dyn DecisionSink>,
    mut receiver: mpsc::UnboundedReceiver<Decision>,
) -> DispatchStats {
    let mut stats = DispatchStats::default();
    while let Some(decision) = receiver.recv().await {
        match sink.report(&decision).await {
            Ok(()) => {
                debug!("Reported {} for pod {}", decision.outcome, decision.pod.id);
                stats.delivered += 1;
            }
            Err(e) => {
                warn!(
                    "Failed to report {} for pod {}: {:#}",
                    decision.outcome, decision.pod.id, e
                );
                stats.failed += 1;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use deck::Outcome;
    use pod_model::Pod;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<(String, Outcome)>>,
    }

    #[async_trait]
    impl DecisionSink for RecordingSink {
        async fn report(&self, decision: &Decision) -> Result<()> {
            // Slow enough that sends outpace delivery
            tokio::time::sleep(Duration::from_millis(5)).await;
            if decision.pod.id == "bad" {
                bail!("server said no");
            }
            self.seen
                .lock()
                .unwrap()
                .push((decision.pod.id.clone(), decision.outcome));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_delivers_in_order_and_drains_on_shutdown() {
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = DecisionDispatcher::spawn(sink.clone());

        dispatcher
            .send(Decision::new(Outcome::Accept, Pod::new("a", "A")))
            .unwrap();
        dispatcher
            .send(Decision::new(Outcome::Reject, Pod::new("b", "B")))
            .unwrap();
        dispatcher
            .send(Decision::new(Outcome::Accept, Pod::new("c", "C")))
            .unwrap();

        let stats = dispatcher.shutdown().await.unwrap();
        assert_eq!(stats, DispatchStats { delivered: 3, failed: 0 });

        let seen = sink.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                ("a".to_string(), Outcome::Accept),
                ("b".to_string(), Outcome::Reject),
                ("c".to_string(), Outcome::Accept),
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_fatal() {
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = DecisionDispatcher::spawn(sink.clone());

        dispatcher
            .send(Decision::new(Outcome::Accept, Pod::new("bad", "Bad")))
            .unwrap();
        dispatcher
            .send(Decision::new(Outcome::Reject, Pod::new("ok", "Ok")))
            .unwrap();

        let stats = dispatcher.shutdown().await.unwrap();
        assert_eq!(stats, DispatchStats { delivered: 1, failed: 1 });
        assert_eq!(sink.seen.lock().unwrap().len(), 1);
    }
}
