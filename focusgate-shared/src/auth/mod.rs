/// Authentication building blocks
///
/// - `password`: Argon2id hashing and verification
/// - `session`: signed session tokens and the request-scoped `Session`

pub mod password;
pub mod session;
