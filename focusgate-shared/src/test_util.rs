/// Shared helpers for unit tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Creates a migrated single-connection in-memory database.
///
/// A pool with more than one connection would hand each connection its own
/// private `:memory:` database, so the pool is pinned to one.
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database should open");

    crate::db::migrations::run_migrations(&pool)
        .await
        .expect("migrations should apply");

    pool
}
