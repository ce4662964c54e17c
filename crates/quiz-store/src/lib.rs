//! # Quiz Store
//!
//! Persistence for the study side of the app: user accounts, subject
//! categories and the quizzes generated for them.
//!
//! ## Rust concept: Shared ownership of a connection
//! `DatabaseClient` wraps `Arc<Mutex<Connection>>`. Cloning the client is
//! cheap and every clone talks to the same SQLite connection.

pub mod client;
pub mod error;
pub mod format;
pub mod models;

pub use client::DatabaseClient;
pub use error::{Result, StoreError};
pub use format::format_subject;
pub use models::{Category, Quiz, RecordId, User};
