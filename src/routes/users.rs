use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{LoginInput, UserInput},
    state::AppState,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Register a new user
///
/// Validates the payload, rejects duplicate emails, and returns the new
/// user's id.
#[post("")]
pub async fn register(
    state: web::Data<AppState>,
    input: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    if state.users.get_user_by_email(&input.email).await?.is_some() {
        return Err(AppError::BadRequest("User already exists".into()));
    }

    let input = input.into_inner();
    let id = state
        .users
        .create_user(input.name, input.email, input.password)
        .await?;

    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// Login user
///
/// Authenticates by email and password and returns a fresh auth token.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    input: web::Json<LoginInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let token = state.users.login_user(&input.email, &input.password).await?;

    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}

/// Get the authenticated user
///
/// Returns the requester's own profile, password hash stripped.
#[get("")]
pub async fn get_user(
    state: web::Data<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let profile = state
        .users
        .get_user_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(profile))
}
