/// User model and database operations
///
/// Accounts are the root of all per-user data: every todo and blocked site
/// row references a user id, and reads/mutations of those rows are always
/// scoped by it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT NOT NULL UNIQUE,
///     hash TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use focusgate_shared::models::user::User;
/// use focusgate_shared::auth::password;
///
/// # async fn example(pool: sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let hash = password::hash_password("hunter2!")?;
/// let user = User::create(&pool, "alice", &hash).await?;
/// println!("Created user: {}", user.id);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::is_unique_violation;

/// Error type for user operations
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// The username is already taken
    ///
    /// Detected from the store's UNIQUE rejection, not a prior existence
    /// check, so two concurrent registrations cannot both succeed.
    #[error("username is already taken")]
    DuplicateUsername,

    /// Any other database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A user account
///
/// The `hash` field holds an Argon2id PHC string; plaintext passwords are
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Row id, assigned by the store
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// Argon2id password hash
    pub hash: String,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns `UserError::DuplicateUsername` if the username is taken,
    /// or `UserError::Database` for any other store failure.
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<Self, UserError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, hash)
            VALUES (?1, ?2)
            RETURNING id, username, hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                UserError::DuplicateUsername
            } else {
                UserError::Database(e)
            }
        })
    }

    /// Finds a user by username
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, hash
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Finds a user by id
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, hash
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a user together with all rows that belong to them
    ///
    /// Children go first (todos, then blocked sites), the user row last, so
    /// referential integrity never sees an orphan. A failure anywhere in
    /// the sequence propagates to the caller: a partial cascade leaves the
    /// store inconsistent and must surface as a hard error, unlike the
    /// recoverable validation failures elsewhere in the system.
    pub async fn delete_account(pool: &SqlitePool, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM todos WHERE user_id = ?1")
            .bind(user_id)
            .execute(pool)
            .await?;

        sqlx::query("DELETE FROM sites WHERE user_id = ?1")
            .bind(user_id)
            .execute(pool)
            .await?;

        sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(user_id)
            .execute(pool)
            .await?;

        tracing::info!(user_id, "Account deleted");
        Ok(())
    }
}
