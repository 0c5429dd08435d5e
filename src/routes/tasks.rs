use crate::{
    auth::AuthenticatedUser, error::AppError, models::RecordId, models::TaskInput, state::AppState,
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Create a task in a project the authenticated user owns.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    input: web::Json<TaskInput>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let input = input.into_inner();
    let project_id = RecordId::from(input.project);
    let task = state
        .tasks
        .create_task(input.title, &project_id, input.time, &user_id)
        .await?;

    Ok(HttpResponse::Created().json(task))
}

/// Delete a task. The requester must own the parent project; returns the
/// deleted record.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let id = RecordId::from(path.into_inner());
    let deleted = state.tasks.delete_task(&id, &user_id).await?;

    Ok(HttpResponse::Ok().json(deleted))
}

/// List a project's tasks. The requester must own the project.
#[get("/project/{id}")]
pub async fn get_project_tasks(
    state: web::Data<AppState>,
    path: web::Path<String>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let project_id = RecordId::from(path.into_inner());
    let tasks = state
        .tasks
        .get_project_tasks(&project_id, &user_id)
        .await?;

    Ok(HttpResponse::Ok().json(tasks))
}
