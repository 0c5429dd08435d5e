//! Postgres store backend.
//!
//! Records keep their store-assigned 24-hex-char ids as TEXT primary keys,
//! so the two backends agree on the id format. Queries are plain runtime
//! `query_as` calls; no compile-time database is required to build.

use super::{NewProject, NewTask, NewUser, Store, StoreError};
use crate::models::{Project, RecordId, Task, TaskUpdate, User, UserUpdate};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the tables if they do not exist yet. Called once at startup.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                "user" TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                project TEXT NOT NULL,
                time TEXT NOT NULL DEFAULT '25:00',
                done BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, email, password_hash, created_at",
        )
        .bind(RecordId::generate())
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: &RecordId) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_user(
        &self,
        id: &RecordId,
        update: UserUpdate,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET name = $1, email = $2, password_hash = $3
             WHERE id = $4
             RETURNING id, name, email, password_hash, created_at",
        )
        .bind(update.name)
        .bind(update.email)
        .bind(update.password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn delete_user(&self, id: &RecordId) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "DELETE FROM users WHERE id = $1
             RETURNING id, name, email, password_hash, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_project(&self, new: NewProject) -> Result<Project, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, title, \"user\", created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, title, \"user\", created_at",
        )
        .bind(RecordId::generate())
        .bind(new.title)
        .bind(new.user)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    async fn find_project(&self, id: &RecordId) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, title, \"user\", created_at FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn update_project(
        &self,
        id: &RecordId,
        title: String,
    ) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            "UPDATE projects SET title = $1 WHERE id = $2
             RETURNING id, title, \"user\", created_at",
        )
        .bind(title)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn delete_project(&self, id: &RecordId) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            "DELETE FROM projects WHERE id = $1
             RETURNING id, title, \"user\", created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn find_projects_by_user(&self, user: &RecordId) -> Result<Vec<Project>, StoreError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, title, \"user\", created_at FROM projects WHERE \"user\" = $1",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    async fn insert_task(&self, new: NewTask) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title, project, time, done, created_at)
             VALUES ($1, $2, $3, $4, FALSE, $5)
             RETURNING id, title, project, time, done, created_at",
        )
        .bind(RecordId::generate())
        .bind(new.title)
        .bind(new.project)
        .bind(new.time)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn find_task(&self, id: &RecordId) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, project, time, done, created_at FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn update_task(
        &self,
        id: &RecordId,
        update: TaskUpdate,
    ) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET title = $1, time = $2, done = $3 WHERE id = $4
             RETURNING id, title, project, time, done, created_at",
        )
        .bind(update.title)
        .bind(update.time)
        .bind(update.done)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn delete_task(&self, id: &RecordId) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "DELETE FROM tasks WHERE id = $1
             RETURNING id, title, project, time, done, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn find_tasks_by_project(&self, project: &RecordId) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, project, time, done, created_at FROM tasks WHERE project = $1",
        )
        .bind(project)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn delete_tasks_by_project(&self, project: &RecordId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE project = $1")
            .bind(project)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
