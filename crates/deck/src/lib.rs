//! # Deck Crate
//!
//! The swipe deck: an ordered queue of pods where only the head can be
//! decided, plus the gesture rule that turns a drag into a decision.
//!
//! ## Example Usage
//!
//! ```ignore
//! use deck::{Gesture, Outcome, SwipeInput, SwipeQueue};
//!
//! let mut queue = SwipeQueue::from_pods(pods);
//! if queue.current().is_some() {
//!     if let Some(decision) = queue.swipe(SwipeInput::Drag(Gesture::horizontal(120.0, 0.9)))? {
//!         sink.send(decision);
//!     }
//! }
//! ```

pub mod decision;
pub mod error;
pub mod gesture;
pub mod queue;

pub use decision::{Decision, Outcome};
pub use error::{DeckError, Result};
pub use gesture::{classify, lean, should_commit, Gesture, GestureOutcome};
pub use queue::{Card, CardState, SwipeInput, SwipeQueue};

#[cfg(test)]
mod tests {
    use super::*;
    use pod_model::Pod;

    #[test]
    fn test_decision_serializes_outcome_lowercase() {
        let json = serde_json::to_string(&Outcome::Accept).unwrap();
        assert_eq!(json, "\"accept\"");
        assert_eq!(Outcome::Reject.to_string(), "reject");
    }

    #[test]
    fn test_drain_deck_with_mixed_inputs() {
        let pods: Vec<Pod> = (1..=4).map(|i| Pod::new(i.to_string(), "pod")).collect();
        let mut queue = SwipeQueue::from_pods(pods);

        let inputs = [
            SwipeInput::Drag(Gesture::horizontal(30.0, 2.0)),   // kept
            SwipeInput::Drag(Gesture::horizontal(150.0, 1.2)),  // accept 1
            SwipeInput::Button(Outcome::Reject),                // reject 2
            SwipeInput::Drag(Gesture::horizontal(-90.0, 0.7)),  // reject 3
            SwipeInput::Button(Outcome::Accept),                // accept 4
        ];

        let decisions: Vec<Decision> = inputs
            .into_iter()
            .filter_map(|input| queue.swipe(input).unwrap())
            .collect();

        let summary: Vec<_> = decisions
            .iter()
            .map(|d| (d.pod.id.as_str(), d.outcome))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("1", Outcome::Accept),
                ("2", Outcome::Reject),
                ("3", Outcome::Reject),
                ("4", Outcome::Accept),
            ]
        );
        assert!(queue.is_empty());
        assert_eq!(queue.swipe(SwipeInput::Button(Outcome::Accept)), Err(DeckError::EmptyQueue));
    }
}
