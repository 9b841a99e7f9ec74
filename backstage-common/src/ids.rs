//! Record id utilities

use uuid::Uuid;

/// Generate a new opaque record id (UUIDv4, hyphenated)
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

/// Prefix applied to remote event ids so they never collide with local ids
pub const EXTERNAL_ID_PREFIX: &str = "aboss-";

/// Build the local id for a remote event id
pub fn external(remote_id: &str) -> String {
    format!("{}{}", EXTERNAL_ID_PREFIX, remote_id)
}
