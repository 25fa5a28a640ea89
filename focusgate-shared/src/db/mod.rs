/// Database utilities
///
/// This module provides the SQLite connection pool and migration runner
/// used by the FocusGate server and its tests.

pub mod migrations;
pub mod pool;

/// Checks whether a sqlx error is a UNIQUE constraint violation.
///
/// Uniqueness invariants (one username per account, one todo text and one
/// blocked domain per user) are enforced by the store so that duplicate
/// detection is atomic with insertion. Callers translate this condition
/// into their own duplicate error rather than pre-checking existence.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation
    )
}
