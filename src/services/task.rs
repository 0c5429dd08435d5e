use super::assert_owner;
use crate::error::AppError;
use crate::models::{RecordId, Task, TaskUpdate};
use crate::store::{NewTask, Store};
use std::sync::Arc;

/// Task CRUD scoped to a parent project.
///
/// Tasks carry no owner of their own, so every task decision resolves the
/// parent project first and checks its owner against the requester.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn owned_project_owner(
        &self,
        project_id: &RecordId,
        requester: &RecordId,
    ) -> Result<(), AppError> {
        let project = self
            .store
            .find_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
        assert_owner(&project.user, requester)
    }

    /// Creates a task in a project the requester owns.
    pub async fn create_task(
        &self,
        title: String,
        project_id: &RecordId,
        time: String,
        requester: &RecordId,
    ) -> Result<Task, AppError> {
        self.owned_project_owner(project_id, requester).await?;
        let task = self
            .store
            .insert_task(NewTask {
                title,
                project: project_id.clone(),
                time,
            })
            .await?;
        Ok(task)
    }

    pub async fn get_task(&self, id: &RecordId) -> Result<Option<Task>, AppError> {
        Ok(self.store.find_task(id).await?)
    }

    /// Replaces a task's mutable fields. Ownership-checked through the
    /// parent project; not exposed over HTTP.
    pub async fn update_task(
        &self,
        id: &RecordId,
        update: TaskUpdate,
        requester: &RecordId,
    ) -> Result<Task, AppError> {
        let task = self
            .store
            .find_task(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
        self.owned_project_owner(&task.project, requester).await?;

        self.store
            .update_task(id, update)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Deletes a task and returns the deleted record. The requester must own
    /// the parent project.
    pub async fn delete_task(&self, id: &RecordId, requester: &RecordId) -> Result<Task, AppError> {
        let task = self
            .store
            .find_task(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
        self.owned_project_owner(&task.project, requester).await?;

        self.store
            .delete_task(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// All tasks of a project the requester owns, unordered.
    pub async fn get_project_tasks(
        &self,
        project_id: &RecordId,
        requester: &RecordId,
    ) -> Result<Vec<Task>, AppError> {
        self.owned_project_owner(project_id, requester).await?;
        Ok(self.store.find_tasks_by_project(project_id).await?)
    }
}
