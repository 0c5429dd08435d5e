use crate::{
    auth::AuthenticatedUser, error::AppError, models::ProjectInput, models::RecordId,
    state::AppState,
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Create a project owned by the authenticated user.
#[post("")]
pub async fn create_project(
    state: web::Data<AppState>,
    input: web::Json<ProjectInput>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let project = state
        .projects
        .create_project(input.into_inner().title, &user_id)
        .await?;

    Ok(HttpResponse::Created().json(project))
}

/// List the authenticated user's projects.
#[get("/user")]
pub async fn get_user_projects(
    state: web::Data<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let projects = state.projects.get_user_projects(&user_id).await?;

    Ok(HttpResponse::Ok().json(projects))
}

/// Fetch a project by id. Reads are not ownership-checked.
#[get("/{id}")]
pub async fn get_project(
    state: web::Data<AppState>,
    path: web::Path<String>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let id = RecordId::from(path.into_inner());
    let project = state
        .projects
        .get_project(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    Ok(HttpResponse::Ok().json(project))
}

/// Delete a project. Only the owner may; returns the deleted record.
#[delete("/{id}")]
pub async fn delete_project(
    state: web::Data<AppState>,
    path: web::Path<String>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let id = RecordId::from(path.into_inner());
    let deleted = state.projects.delete_project(&id, &user_id).await?;

    Ok(HttpResponse::Ok().json(deleted))
}
