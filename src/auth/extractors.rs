use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::RecordId;

/// Extracts the authenticated user's id from request extensions.
///
/// Intended for routes protected by `AuthMiddleware`, which validates the
/// token and inserts the subject id. If the id is missing (middleware not
/// applied, or an internal wiring error), the request is rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub RecordId);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<RecordId>().cloned() {
            Some(user_id) => ready(Ok(AuthenticatedUser(user_id))),
            None => {
                let err = AppError::Unauthorized("No token, authorization denied".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
