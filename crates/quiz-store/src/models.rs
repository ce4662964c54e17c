//! Record types stored in the quiz database.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Row id of a stored record
pub type RecordId = i64;

/// An account. Usernames are unique; the password is stored as given
/// (callers hash before handing it over).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub password: String,
}

/// A bucket of quizzes keyed by normalized subject name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    /// Number of quizzes saved under this category so far
    pub num_quizzes: i64,
}

/// A generated quiz. `questions` are opaque objects produced by the
/// question generator and stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: RecordId,
    pub category_id: RecordId,
    pub title: String,
    pub questions: Vec<Value>,
}
