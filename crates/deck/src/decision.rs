//! Decisions produced by the deck.

use pod_model::Pod;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user did with a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Swiped right / "love"
    Accept,
    /// Swiped left / "nope"
    Reject,
}

impl Outcome {
    /// Outcome for a horizontal displacement: right accepts, left rejects.
    pub fn from_direction(dx: f64) -> Self {
        if dx > 0.0 { Outcome::Accept } else { Outcome::Reject }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accept => write!(f, "accept"),
            Outcome::Reject => write!(f, "reject"),
        }
    }
}

/// A consumed card together with the outcome applied to it.
///
/// Decisions are handed to the decision sink and never come back to the
/// queue; there is no undo.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub outcome: Outcome,
    pub pod: Pod,
}

impl Decision {
    pub fn new(outcome: Outcome, pod: Pod) -> Self {
        Self { outcome, pod }
    }

    pub fn is_accept(&self) -> bool {
        self.outcome == Outcome::Accept
    }
}
