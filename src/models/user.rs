//! Dashboard users. Only the seeder writes these.

use serde::{Deserialize, Serialize};

/// User document as stored; never returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// argon2id PHC string.
    pub password: String,
}

/// Placeholder user with a plaintext password, as read from seed data.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}
