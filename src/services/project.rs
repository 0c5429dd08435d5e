use super::assert_owner;
use crate::error::AppError;
use crate::models::{Project, RecordId};
use crate::store::{NewProject, Store};
use std::sync::Arc;

/// What happens to a project's tasks when the project is deleted.
///
/// The historical behavior is `Orphan`: tasks keep their dangling project
/// reference and become unreachable through the API. `Cascade` removes them
/// in the same request. Selected via `CASCADE_DELETE` (default: orphan).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeMode {
    Orphan,
    Cascade,
}

/// Project CRUD with ownership linkage to a user.
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn Store>,
    cascade: CascadeMode,
}

impl ProjectService {
    pub fn new(store: Arc<dyn Store>, cascade: CascadeMode) -> Self {
        Self { store, cascade }
    }

    /// Creates a project owned by `user_id`. The owner is fixed for the
    /// project's lifetime.
    pub async fn create_project(
        &self,
        title: String,
        user_id: &RecordId,
    ) -> Result<Project, AppError> {
        let project = self
            .store
            .insert_project(NewProject {
                title,
                user: user_id.clone(),
            })
            .await?;
        Ok(project)
    }

    /// Fetches a project by id. Reads are not ownership-checked.
    pub async fn get_project(&self, id: &RecordId) -> Result<Option<Project>, AppError> {
        Ok(self.store.find_project(id).await?)
    }

    /// Retitles a project. Ownership-checked; not exposed over HTTP.
    pub async fn update_project(
        &self,
        id: &RecordId,
        title: String,
        requester: &RecordId,
    ) -> Result<Project, AppError> {
        let project = self
            .store
            .find_project(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
        assert_owner(&project.user, requester)?;

        self.store
            .update_project(id, title)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    /// Deletes a project and returns the deleted record. Only the owner may
    /// delete; in cascade mode the project's tasks are removed as well.
    pub async fn delete_project(
        &self,
        id: &RecordId,
        requester: &RecordId,
    ) -> Result<Project, AppError> {
        let project = self
            .store
            .find_project(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
        assert_owner(&project.user, requester)?;

        let deleted = self
            .store
            .delete_project(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        if self.cascade == CascadeMode::Cascade {
            let removed = self.store.delete_tasks_by_project(id).await?;
            if removed > 0 {
                log::info!("cascade-deleted {} task(s) of project {}", removed, id);
            }
        }

        Ok(deleted)
    }

    /// All projects owned by the user, unordered.
    pub async fn get_user_projects(&self, user_id: &RecordId) -> Result<Vec<Project>, AppError> {
        Ok(self.store.find_projects_by_user(user_id).await?)
    }
}
