/**
 * User Model
 *
 * A registered user. `places` holds the ids of the places the user created,
 * in creation order; it is only ever changed by the ownership linker, in the
 * same atomic unit that creates or removes the place.
 */

use uuid::Uuid;

/// User record as stored
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// User email address, normalized and unique
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Ids of owned places, oldest first
    pub places: Vec<Uuid>,
}

impl User {
    /// Create a user with a fresh id and no places
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: normalize_email(&email.into()),
            password_hash,
            places: Vec::new(),
        }
    }
}

/// Canonical form of an email address used for lookups and uniqueness
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
