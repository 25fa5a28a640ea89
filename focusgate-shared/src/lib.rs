//! # FocusGate Shared Library
//!
//! This crate contains the domain layer shared by the FocusGate server
//! binary and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, todos, blocked sites)
//! - `auth`: Password hashing and session tokens
//! - `db`: Connection pool and migrations
//! - `quotes`: Motivational quote client with fallback behavior

pub mod auth;
pub mod db;
pub mod models;
pub mod quotes;

/// Current version of the FocusGate shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
pub(crate) mod test_util;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
