//! In-memory store backend. Used by the integration tests (and handy for
//! local experimentation) so the full HTTP stack can run without Postgres.

use super::{NewProject, NewTask, NewUser, Store, StoreError};
use crate::models::{Project, RecordId, Task, TaskUpdate, User, UserUpdate};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<RecordId, User>>,
    projects: RwLock<HashMap<RecordId, Project>>,
    tasks: RwLock<HashMap<RecordId, Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: RecordId::generate(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: &RecordId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_user(
        &self,
        id: &RecordId,
        update: UserUpdate,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(id).map(|user| {
            user.name = update.name;
            user.email = update.email;
            user.password_hash = update.password_hash;
            user.clone()
        }))
    }

    async fn delete_user(&self, id: &RecordId) -> Result<Option<User>, StoreError> {
        Ok(self.users.write().await.remove(id))
    }

    async fn insert_project(&self, new: NewProject) -> Result<Project, StoreError> {
        let project = Project {
            id: RecordId::generate(),
            title: new.title,
            user: new.user,
            created_at: Utc::now(),
        };
        self.projects
            .write()
            .await
            .insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn find_project(&self, id: &RecordId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.read().await.get(id).cloned())
    }

    async fn update_project(
        &self,
        id: &RecordId,
        title: String,
    ) -> Result<Option<Project>, StoreError> {
        let mut projects = self.projects.write().await;
        Ok(projects.get_mut(id).map(|project| {
            project.title = title;
            project.clone()
        }))
    }

    async fn delete_project(&self, id: &RecordId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.write().await.remove(id))
    }

    async fn find_projects_by_user(&self, user: &RecordId) -> Result<Vec<Project>, StoreError> {
        Ok(self
            .projects
            .read()
            .await
            .values()
            .filter(|p| &p.user == user)
            .cloned()
            .collect())
    }

    async fn insert_task(&self, new: NewTask) -> Result<Task, StoreError> {
        let task = Task {
            id: RecordId::generate(),
            title: new.title,
            project: new.project,
            time: new.time,
            done: false,
            created_at: Utc::now(),
        };
        self.tasks
            .write()
            .await
            .insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: &RecordId) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(id).cloned())
    }

    async fn update_task(
        &self,
        id: &RecordId,
        update: TaskUpdate,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.get_mut(id).map(|task| {
            task.title = update.title;
            task.time = update.time;
            task.done = update.done;
            task.clone()
        }))
    }

    async fn delete_task(&self, id: &RecordId) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.write().await.remove(id))
    }

    async fn find_tasks_by_project(&self, project: &RecordId) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| &t.project == project)
            .cloned()
            .collect())
    }

    async fn delete_tasks_by_project(&self, project: &RecordId) -> Result<u64, StoreError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|_, t| &t.project != project);
        Ok((before - tasks.len()) as u64)
    }
}
