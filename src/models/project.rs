use super::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A project owned by exactly one user. The owner is fixed at creation;
/// there is no transfer path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    /// Owning user's id.
    pub user: RecordId,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for `POST /api/project`. The owner comes from the
/// authenticated identity, never from the body. An omitted title
/// deserializes as empty and fails the same validation rule.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
}
