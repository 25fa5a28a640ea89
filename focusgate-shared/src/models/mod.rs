/// Database models
///
/// One module per table, each owning its row type, typed errors, and the
/// SQL that touches it:
///
/// - `user`: accounts and the cascading account deletion
/// - `todo`: per-user tasks with a completion flag
/// - `site`: per-user blocked domains

pub mod site;
pub mod todo;
pub mod user;
