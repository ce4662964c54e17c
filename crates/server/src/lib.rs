//! Server crate for the pod swipe app.
//!
//! This crate wires the collaborators, filters and deck together: it loads
//! decks, runs swipe sessions, reports decisions to the pod server in the
//! background and talks to the question generation service.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod orchestrator;
pub mod quiz_gen;
pub mod sink;

pub use config::Config;
pub use dispatch::{DecisionDispatcher, DispatchStats};
pub use error::DispatchError;
pub use orchestrator::{CardView, Deck, DeckLoader, SessionSummary, SwipeSession};
pub use quiz_gen::{NotesFile, QuizGenerator};
pub use sink::{endpoint_for, DecisionSink, HttpDecisionSink};
