use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// User row in the in-memory store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,                    // unique user ID
    pub first_name: String,
    pub last_name: String,
    pub email: String,              // lowercased, unique
    pub nationality: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,      // Argon2 hash, not exposed in JSON
    pub created_at: OffsetDateTime, // creation timestamp
}
