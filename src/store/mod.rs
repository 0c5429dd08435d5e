//!
//! # Persistence Gateway
//!
//! All record storage goes through the [`Store`] trait: find-by-id,
//! find-by-filter, insert, update, and delete for the three record kinds
//! (users, projects, tasks). Services receive an `Arc<dyn Store>` at
//! construction, so the backend can be swapped without touching them —
//! [`PgStore`] in production, [`MemoryStore`] in tests.
//!
//! The store assigns each record's id and creation timestamp on insert.
//! Deletes return the deleted record, mirroring find-and-delete semantics.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::models::{Project, RecordId, Task, TaskUpdate, User, UserUpdate};
use async_trait::async_trait;
use std::fmt;

/// Error from the persistence backend. Carries no HTTP semantics; the
/// handler layer renders every store failure as a generic server error.
#[derive(Debug)]
pub enum StoreError {
    Database(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Database(msg) => write!(f, "database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        StoreError::Database(error.to_string())
    }
}

/// Insert payload for a user; the password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub user: RecordId,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub project: RecordId,
    pub time: String,
}

#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError>;
    async fn find_user_by_id(&self, id: &RecordId) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn update_user(&self, id: &RecordId, update: UserUpdate)
        -> Result<Option<User>, StoreError>;
    async fn delete_user(&self, id: &RecordId) -> Result<Option<User>, StoreError>;

    // Projects
    async fn insert_project(&self, new: NewProject) -> Result<Project, StoreError>;
    async fn find_project(&self, id: &RecordId) -> Result<Option<Project>, StoreError>;
    async fn update_project(&self, id: &RecordId, title: String)
        -> Result<Option<Project>, StoreError>;
    async fn delete_project(&self, id: &RecordId) -> Result<Option<Project>, StoreError>;
    async fn find_projects_by_user(&self, user: &RecordId) -> Result<Vec<Project>, StoreError>;

    // Tasks
    async fn insert_task(&self, new: NewTask) -> Result<Task, StoreError>;
    async fn find_task(&self, id: &RecordId) -> Result<Option<Task>, StoreError>;
    async fn update_task(&self, id: &RecordId, update: TaskUpdate)
        -> Result<Option<Task>, StoreError>;
    async fn delete_task(&self, id: &RecordId) -> Result<Option<Task>, StoreError>;
    async fn find_tasks_by_project(&self, project: &RecordId) -> Result<Vec<Task>, StoreError>;
    async fn delete_tasks_by_project(&self, project: &RecordId) -> Result<u64, StoreError>;
}
