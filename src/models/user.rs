use super::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user record as held by the store. The password is kept only as a bcrypt
/// hash and is never serialized into a response body; clients see
/// [`UserProfile`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user, with the password hash stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Registration payload for `POST /api/user`.
///
/// Fields default to empty strings so an omitted field fails the same
/// validation rule as an empty one, instead of a deserialization error.
#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(
        min = 6,
        message = "Please enter a password with 6 or more characters"
    ))]
    pub password: String,
}

/// Login payload for `POST /api/user/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[serde(default)]
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Field replacement for a user record. Applied whole, like the registration
/// payload; the password arrives pre-hashed from the service layer.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
