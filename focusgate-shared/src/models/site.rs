/// Blocked-site model and database operations
///
/// Per-user blocked domains. Raw input is normalized into a comparable
/// domain form before validation and storage; rows are never mutated, only
/// inserted and deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sites (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     url TEXT NOT NULL,
///     user_id INTEGER NOT NULL REFERENCES users (id),
///     added_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
///     UNIQUE (user_id, url)
/// );
/// ```

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::LazyLock;

use crate::db::is_unique_violation;

/// Accepted domain shape: one-or-more dotted labels and a 2+ letter TLD,
/// with an optional path.
///
/// Deliberately permissive — label position rules are not checked, and the
/// accept/reject boundary of this exact pattern is the contract relied on
/// by stored data and tests.
static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}(/.*)?$")
        .expect("domain pattern must compile")
});

/// Error type for blocklist operations
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Nothing left after normalization
    #[error("site is empty")]
    Empty,

    /// Input does not look like a domain
    #[error("site is not a valid domain")]
    InvalidFormat,

    /// The user already blocks this domain
    ///
    /// Enforced by UNIQUE (user_id, url) at insert.
    #[error("site is already blocked for this user")]
    Duplicate,

    /// Any other database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A domain on a user's blocklist
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlockedSite {
    /// Row id, assigned by the store
    pub id: i64,

    /// Normalized domain (no scheme, no trailing slash, lowercase)
    pub url: String,

    /// Owning user
    pub user_id: i64,

    /// Insertion time, used for newest-first ordering
    pub added_at: DateTime<Utc>,
}

/// Canonicalizes raw site input into a comparable domain form
///
/// Trims, lowercases, strips one leading `http://` or `https://` (literal
/// prefixes, checked in that order), and strips all trailing slashes.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let stripped = lowered
        .strip_prefix("http://")
        .or_else(|| lowered.strip_prefix("https://"))
        .unwrap_or(&lowered);
    stripped.trim_end_matches('/').to_string()
}

/// Checks whether a normalized site string looks like a domain
pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_REGEX.is_match(domain)
}

impl BlockedSite {
    /// Adds a site to a user's blocklist
    ///
    /// The raw input is normalized first; the stored value is the
    /// normalized form.
    ///
    /// # Errors
    ///
    /// - `SiteError::Empty` if nothing remains after normalization
    /// - `SiteError::InvalidFormat` if the result is not domain-shaped
    /// - `SiteError::Duplicate` if this user already blocks the domain
    pub async fn add(pool: &SqlitePool, user_id: i64, raw: &str) -> Result<Self, SiteError> {
        let site = normalize(raw);
        if site.is_empty() {
            return Err(SiteError::Empty);
        }
        if !is_valid_domain(&site) {
            return Err(SiteError::InvalidFormat);
        }

        sqlx::query_as::<_, BlockedSite>(
            r#"
            INSERT INTO sites (url, user_id, added_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, url, user_id, added_at
            "#,
        )
        .bind(&site)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                SiteError::Duplicate
            } else {
                SiteError::Database(e)
            }
        })
    }

    /// Lists a user's blocked sites, newest first
    pub async fn list(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BlockedSite>(
            r#"
            SELECT id, url, user_id, added_at
            FROM sites
            WHERE user_id = ?1
            ORDER BY added_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Removes a site from a user's blocklist
    ///
    /// Returns whether a row was deleted. `false` covers both an unknown
    /// id and a row owned by another user — callers must not distinguish
    /// the two.
    pub async fn remove(pool: &SqlitePool, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sites WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
