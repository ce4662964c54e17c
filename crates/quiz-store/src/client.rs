//! SQLite-backed persistence for users, categories and quizzes.
//!
//! All operations go through one connection guarded by a mutex, so a
//! `DatabaseClient` can be cloned and shared across threads.

use crate::error::{Result, StoreError};
use crate::format::format_subject;
use crate::models::{Category, Quiz, RecordId, User};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL,
        num_quizzes INTEGER NOT NULL DEFAULT 0
    );
    CREATE TABLE IF NOT EXISTS quizzes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_id INTEGER NOT NULL REFERENCES categories(id),
        title TEXT NOT NULL,
        question_objects TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_quizzes_category ON quizzes(category_id);
";

/// Handle to the quiz database
#[derive(Clone, Debug)]
pub struct DatabaseClient {
    conn: Arc<Mutex<Connection>>,
}

impl DatabaseClient {
    /// Open or create a database file and make sure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!("Opened quiz database at {}", path.display());
        Self::init(conn)
    }

    /// A private database that disappears when the client is dropped.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Close the connection, flushing any pending work.
    ///
    /// If other clones of this client are still alive the connection stays
    /// open until the last one is dropped.
    pub fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                let conn = mutex.into_inner().map_err(|_| StoreError::LockPoisoned)?;
                conn.close().map_err(|(_, e)| StoreError::Database(e))?;
                info!("Closed quiz database");
                Ok(())
            }
            Err(_) => {
                debug!("Quiz database still shared; deferring close");
                Ok(())
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    // ---- users ----

    /// Insert a new user. Usernames are unique.
    pub fn create_user(&self, username: &str, password: &str) -> Result<User> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![username, password],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref err, _)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                StoreError::DuplicateUsername(username.to_string())
            }
            other => StoreError::Database(other),
        })?;

        let id = conn.last_insert_rowid();
        debug!("Created user {} ({})", username, id);
        Ok(User {
            id,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn find_user(&self, username: &str) -> Result<Option<User>> {
        let conn = self.lock()?;
        let user = conn
            .query_row(
                "SELECT id, username, password FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    // ---- categories ----

    /// Look up a category by subject, creating it if missing.
    ///
    /// The subject is normalized with [`format_subject`] first, so
    /// `"biology"` and `"BIOLOGY"` land in the same category.
    pub fn find_or_create_category(&self, subject: &str) -> Result<Category> {
        let name = normalized_name(subject)?;
        let conn = self.lock()?;
        find_or_create_in(&conn, &name)
    }

    /// All categories, ordered by name.
    pub fn categories(&self) -> Result<Vec<Category>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, name, num_quizzes FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], category_from_row)?;
        let categories = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    // ---- quizzes ----

    /// Store a generated quiz under the category for `subject`.
    ///
    /// ## Algorithm
    /// 1. Normalize the subject and find or create its category
    /// 2. Title the quiz `"<Subject> - <n>"` where `n` is the category's
    ///    current quiz count
    /// 3. Insert the quiz and bump the count
    ///
    /// All three steps run in one transaction.
    pub fn save_quiz(&self, subject: &str, questions: Vec<Value>) -> Result<Quiz> {
        let name = normalized_name(subject)?;
        let encoded = serde_json::to_string(&questions)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let category = find_or_create_in(&tx, &name)?;
        let title = format!("{} - {}", category.name, category.num_quizzes);

        tx.execute(
            "INSERT INTO quizzes (category_id, title, question_objects) VALUES (?1, ?2, ?3)",
            params![category.id, title, encoded],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "UPDATE categories SET num_quizzes = num_quizzes + 1 WHERE id = ?1",
            params![category.id],
        )?;
        tx.commit()?;

        info!("Saved quiz '{}' with {} questions", title, questions.len());
        Ok(Quiz {
            id,
            category_id: category.id,
            title,
            questions,
        })
    }

    /// Quizzes in a category, oldest first.
    pub fn quizzes_for_category(&self, category_id: RecordId) -> Result<Vec<Quiz>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, category_id, title, question_objects
             FROM quizzes WHERE category_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![category_id], |row| {
            Ok((
                row.get::<_, RecordId>(0)?,
                row.get::<_, RecordId>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut quizzes = Vec::new();
        for row in rows {
            let (id, category_id, title, raw) = row?;
            quizzes.push(Quiz {
                id,
                category_id,
                title,
                questions: serde_json::from_str(&raw)?,
            });
        }
        Ok(quizzes)
    }
}

fn normalized_name(subject: &str) -> Result<String> {
    if subject.trim().is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(format_subject(subject))
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        num_quizzes: row.get(2)?,
    })
}

fn find_or_create_in(conn: &Connection, name: &str) -> Result<Category> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
        params![name],
    )?;
    if inserted > 0 {
        debug!("Created category {}", name);
    }
    let category = conn.query_row(
        "SELECT id, name, num_quizzes FROM categories WHERE name = ?1",
        params![name],
        category_from_row,
    )?;
    Ok(category)
}
