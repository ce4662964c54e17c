//! The swipe queue.
//!
//! ## Algorithm
//! Cards are stored in arrival order together with an explicit state tag.
//! A cursor points at the first `Pending` card; everything before it is
//! `Decided`. Deciding flips the head's state and advances the cursor, so
//! the pending region only ever shrinks from the front and no card can be
//! decided twice.

use crate::decision::{Decision, Outcome};
use crate::error::{DeckError, Result};
use crate::gesture::{classify, Gesture, GestureOutcome};
use pod_model::Pod;
use tracing::debug;

/// Lifecycle of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Pending,
    Decided(Outcome),
}

/// A pod plus its lifecycle state.
#[derive(Debug, Clone)]
pub struct Card {
    pub pod: Pod,
    pub state: CardState,
}

/// Something the user did to the head card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeInput {
    /// A finished drag, gated by the commit thresholds
    Drag(Gesture),
    /// A love/nope button press, which always commits
    Button(Outcome),
}

/// Ordered deck of pods awaiting a decision.
///
/// The head is the only card eligible for a decision. The queue performs no
/// I/O; forwarding a `Decision` is the caller's job.
#[derive(Debug, Clone, Default)]
pub struct SwipeQueue {
    cards: Vec<Card>,
    head: usize,
}

impl SwipeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from pods in presentation order.
    pub fn from_pods(pods: Vec<Pod>) -> Self {
        let mut queue = Self::new();
        queue.enqueue_all(pods);
        queue
    }

    /// Append pods to the back of the queue in the given order.
    ///
    /// Duplicates are kept as separate cards.
    pub fn enqueue_all(&mut self, pods: impl IntoIterator<Item = Pod>) {
        self.cards.extend(pods.into_iter().map(|pod| Card {
            pod,
            state: CardState::Pending,
        }));
    }

    /// The head pod, without removing it.
    pub fn current(&self) -> Option<&Pod> {
        self.cards.get(self.head).map(|card| &card.pod)
    }

    /// Pending pods behind the head, head first.
    pub fn upcoming(&self) -> impl Iterator<Item = &Pod> {
        self.cards.iter().skip(self.head).map(|card| &card.pod)
    }

    /// Consume the head with `outcome`.
    ///
    /// # Returns
    /// * `Ok(Decision)` - The decided pod, now removed from the pending region
    /// * `Err(DeckError::EmptyQueue)` - Nothing to decide on; state untouched
    pub fn decide(&mut self, outcome: Outcome) -> Result<Decision> {
        let card = self
            .cards
            .get_mut(self.head)
            .ok_or(DeckError::EmptyQueue)?;

        card.state = CardState::Decided(outcome);
        self.head += 1;

        debug!("Decided {} on pod {}", outcome, card.pod.id);
        Ok(Decision::new(outcome, card.pod.clone()))
    }

    /// Apply a user input to the head.
    ///
    /// Drags below the commit thresholds return `Ok(None)` and leave the
    /// head in place. Buttons always commit.
    pub fn swipe(&mut self, input: SwipeInput) -> Result<Option<Decision>> {
        if self.is_empty() {
            return Err(DeckError::EmptyQueue);
        }
        let outcome = match input {
            SwipeInput::Button(outcome) => outcome,
            SwipeInput::Drag(gesture) => match classify(&gesture) {
                GestureOutcome::Commit(outcome) => outcome,
                GestureOutcome::Keep => return Ok(None),
            },
        };
        self.decide(outcome).map(Some)
    }

    /// Number of pending cards.
    pub fn len(&self) -> usize {
        self.cards.len() - self.head
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cards ever enqueued, decided or not.
    pub fn total(&self) -> usize {
        self.cards.len()
    }

    /// Cards already decided, in the order they were decided.
    pub fn decided(&self) -> impl Iterator<Item = (&Pod, Outcome)> {
        self.cards.iter().filter_map(|card| match card.state {
            CardState::Decided(outcome) => Some((&card.pod, outcome)),
            CardState::Pending => None,
        })
    }

    /// All cards with their states, in arrival order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
