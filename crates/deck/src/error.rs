use thiserror::Error;

/// Errors raised by the swipe deck.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// A decision was attempted with no card at the head of the queue.
    ///
    /// Callers are expected to check `SwipeQueue::current()` first, so this
    /// signals a contract violation rather than a runtime condition.
    #[error("No pod at the head of the queue to decide on")]
    EmptyQueue,
}

pub type Result<T> = std::result::Result<T, DeckError>;
