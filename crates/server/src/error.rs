//! Errors raised by the decision dispatcher.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    /// The worker is gone, so the decision could not be queued
    #[error("Decision dispatcher is closed")]
    Closed,

    /// The worker task panicked or was cancelled before draining
    #[error("Dispatcher worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
