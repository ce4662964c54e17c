//! Interpretation of drag gestures.
//!
//! A drag only becomes a decision when it is both long enough and fast
//! enough at release. The rule lives in [`should_commit`] so it can be
//! tested without any gesture plumbing.

use crate::decision::Outcome;

/// Minimum absolute horizontal displacement for a drag to commit
pub const COMMIT_DISTANCE: f64 = 80.0;

/// Minimum absolute horizontal velocity at release for a drag to commit
pub const COMMIT_VELOCITY: f64 = 0.5;

/// State of a drag at the moment it ended.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gesture {
    /// Cumulative horizontal displacement
    pub dx: f64,
    /// Cumulative vertical displacement
    pub dy: f64,
    /// Horizontal velocity at release
    pub vx: f64,
    /// Vertical velocity at release
    pub vy: f64,
}

impl Gesture {
    /// Horizontal-only gesture, which is all the commit rule looks at.
    pub fn horizontal(dx: f64, vx: f64) -> Self {
        Self {
            dx,
            vx,
            ..Self::default()
        }
    }
}

/// Result of classifying a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Snap the card back; nothing is decided
    Keep,
    /// Throw the card off screen with this outcome
    Commit(Outcome),
}

/// Whether a drag ending with displacement `dx` and velocity `vx` commits.
///
/// Both thresholds must be met: `|dx| >= 80` and `|vx| >= 0.5`.
pub fn should_commit(dx: f64, vx: f64) -> bool {
    dx.abs() >= COMMIT_DISTANCE && vx.abs() >= COMMIT_VELOCITY
}

/// Classify a finished drag.
pub fn classify(gesture: &Gesture) -> GestureOutcome {
    if should_commit(gesture.dx, gesture.vx) {
        GestureOutcome::Commit(Outcome::from_direction(gesture.dx))
    } else {
        GestureOutcome::Keep
    }
}

/// Feedback while a drag is still in progress.
///
/// Shows which way the card is leaning; `None` when it is centred.
pub fn lean(dx: f64) -> Option<Outcome> {
    if dx > 0.0 {
        Some(Outcome::Accept)
    } else if dx < 0.0 {
        Some(Outcome::Reject)
    } else {
        None
    }
}
