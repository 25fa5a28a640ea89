/// Todo model and database operations
///
/// Per-user tasks with a completion flag. Every mutation is scoped by both
/// the row id and the owning user id; a scoped UPDATE or DELETE that
/// matches zero rows (unknown id, or a row owned by someone else) is a
/// silent no-op rather than an error.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     task TEXT NOT NULL,
///     user_id INTEGER NOT NULL REFERENCES users (id),
///     completed INTEGER NOT NULL DEFAULT 0,
///     added_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
///     UNIQUE (user_id, task)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::is_unique_violation;

/// Minimum length of a task after trimming surrounding whitespace
const MIN_TASK_LEN: usize = 3;

/// Error type for todo operations
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// Trimmed task text is shorter than three characters
    #[error("task must be at least 3 characters")]
    TooShort,

    /// The user already has a task with exactly this text
    ///
    /// Case-sensitive match, enforced by UNIQUE (user_id, task) at insert.
    #[error("task already exists for this user")]
    Duplicate,

    /// Any other database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A task on a user's todo list
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Row id, assigned by the store
    pub id: i64,

    /// Task text, stored trimmed
    pub task: String,

    /// Owning user
    pub user_id: i64,

    /// Completion flag
    pub completed: bool,

    /// Insertion time, used for newest-first ordering
    pub added_at: DateTime<Utc>,
}

impl Todo {
    /// Adds a task to a user's list
    ///
    /// Trims surrounding whitespace before validating. The duplicate rule
    /// is enforced by the store's UNIQUE constraint so the insert either
    /// lands or fails atomically.
    ///
    /// # Errors
    ///
    /// - `TodoError::TooShort` if the trimmed text has fewer than three
    ///   characters
    /// - `TodoError::Duplicate` if this user already has the exact text
    pub async fn add(pool: &SqlitePool, user_id: i64, text: &str) -> Result<Self, TodoError> {
        let task = text.trim();
        if task.chars().count() < MIN_TASK_LEN {
            return Err(TodoError::TooShort);
        }

        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (task, user_id, completed, added_at)
            VALUES (?1, ?2, 0, ?3)
            RETURNING id, task, user_id, completed, added_at
            "#,
        )
        .bind(task)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                TodoError::Duplicate
            } else {
                TodoError::Database(e)
            }
        })
    }

    /// Lists a user's tasks, newest first
    ///
    /// The id tiebreak keeps same-second inserts in insertion order.
    pub async fn list(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, task, user_id, completed, added_at
            FROM todos
            WHERE user_id = ?1
            ORDER BY added_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Marks a task as completed
    ///
    /// No-op when the id does not exist or belongs to another user.
    pub async fn complete(pool: &SqlitePool, id: i64, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE todos SET completed = 1 WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Marks a task as not completed
    ///
    /// No-op when the id does not exist or belongs to another user.
    pub async fn undo(pool: &SqlitePool, id: i64, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE todos SET completed = 0 WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Deletes a task
    ///
    /// No-op when the id does not exist or belongs to another user.
    pub async fn delete(pool: &SqlitePool, id: i64, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM todos WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

/// Completion percentage of a task list
///
/// `floor(100 * completed / total)`, or 0 for an empty list. Integer
/// truncation, not rounding: one of three done is 33, not 34.
pub fn progress(todos: &[Todo]) -> u8 {
    if todos.is_empty() {
        return 0;
    }
    let completed = todos.iter().filter(|t| t.completed).count();
    (completed * 100 / todos.len()) as u8
}
