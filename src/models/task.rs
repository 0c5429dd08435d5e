use super::RecordId;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Fallback time estimate when a stored task carries none.
pub const DEFAULT_TIME: &str = "25:00";

lazy_static! {
    // Time estimates are "MM:SS"; minutes may run past 99 for long sessions.
    static ref TIME_REGEX: regex::Regex = regex::Regex::new(r"^[0-9]{1,3}:[0-5][0-9]$").unwrap();
}

/// A task inside a project. Tasks carry no owner of their own; authorization
/// is derived through the parent project's owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    /// Parent project's id.
    pub project: RecordId,
    /// Time estimate in "MM:SS" format.
    #[serde(default = "default_time")]
    pub time: String,
    #[serde(default)]
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

fn default_time() -> String {
    DEFAULT_TIME.to_string()
}

/// Creation payload for `POST /api/task`. Omitted fields deserialize as
/// empty strings and fail the presence rules below.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Id of the parent project.
    #[serde(default)]
    #[validate(length(min = 1, message = "Project is required"))]
    pub project: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Time is required"),
        regex(path = "TIME_REGEX", message = "Time must be in MM:SS format")
    )]
    pub time: String,
}

/// Field replacement for a task, used by the service-level update path.
#[derive(Debug, Clone)]
pub struct TaskUpdate {
    pub title: String,
    pub time: String,
    pub done: bool,
}
