//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application, together with the JSON body shapes the API emits for each
//! failure class. It is the only place that maps domain outcomes to HTTP
//! status codes; services and the store never touch status codes themselves.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handler results
//! convert into responses automatically, and provides `From` impls for
//! `validator::ValidationErrors` and the store's error type so the `?`
//! operator works at every layer.

use actix_web::{error::ResponseError, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::store::StoreError;

/// A single field-scoped validation failure, in the shape clients receive:
/// `{"msg": "...", "param": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
}

/// Represents all failure classes the API can report.
///
/// Note the deliberate quirks preserved from the original API contract:
/// not-found conditions are reported as 400 (not 404), and login failures
/// collapse into one `InvalidCredentials` outcome so clients cannot tell an
/// unknown email from a wrong password.
#[derive(Debug, PartialEq)]
pub enum AppError {
    /// Malformed or missing input fields (HTTP 400). One entry per failing
    /// field, first failing rule only.
    Validation(Vec<FieldError>),
    /// A referenced record does not exist (HTTP 400, by contract).
    NotFound(String),
    /// Client-side error other than field validation, e.g. a duplicate
    /// registration (HTTP 400).
    BadRequest(String),
    /// Unknown email or wrong password on login (HTTP 400). Always rendered
    /// with the same message for both causes.
    InvalidCredentials,
    /// Missing, malformed, or expired token (HTTP 401).
    Unauthorized(String),
    /// Authenticated, but not the owner of the resource (HTTP 403).
    Forbidden(String),
    /// Any unexpected collaborator failure (HTTP 500). The message is logged
    /// where the error arises; clients only ever see "Server error".
    Internal(String),
}

impl AppError {
    /// Shorthand for the ownership-failure rejection.
    pub fn not_authorized() -> Self {
        AppError::Forbidden("User not authorized".into())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation failed: {} field(s)", errors.len()),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(errors) => HttpResponse::BadRequest().json(json!({
                "errors": errors
            })),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => {
                HttpResponse::BadRequest().json(json!({
                    "errors": [{ "msg": msg }]
                }))
            }
            AppError::InvalidCredentials => HttpResponse::BadRequest().json(json!({
                "errors": [{ "msg": "Incorrect email or password" }]
            })),
            // The middleware's rejections use a bare {"msg": ...} body.
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "msg": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "errors": [{ "msg": msg }]
            })),
            AppError::Internal(_) => HttpResponse::InternalServerError().json(json!({
                "errors": [{ "msg": "Server error" }]
            })),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// All failing fields are collected, but only the first failing rule per
/// field is reported, matching the API's one-message-per-field contract.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| FieldError {
                    msg: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field)),
                    param: field.to_string(),
                })
            })
            .collect();
        // field_errors() iterates a HashMap; sort for stable response bodies
        fields.sort_by(|a, b| a.param.cmp(&b.param));
        AppError::Validation(fields)
    }
}

/// Converts store failures into the generic internal error. The underlying
/// cause was already logged by the store; the client sees "Server error".
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;
    use validator::Validate;

    fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = response.into_body().try_into_bytes().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_error_status_codes() {
        let error = AppError::Validation(vec![]);
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("Project not found".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::BadRequest("User already exists".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::InvalidCredentials;
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::Unauthorized("Token is not valid".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::not_authorized();
        assert_eq!(error.error_response().status(), 403);

        let error = AppError::Internal("connection refused".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let error = AppError::Internal("password hash panicked: secret detail".into());
        let body = body_json(error.error_response());
        assert_eq!(body["errors"][0]["msg"], "Server error");
        assert!(!body.to_string().contains("secret detail"));
    }

    #[test]
    fn test_invalid_credentials_body_is_uniform() {
        let body = body_json(AppError::InvalidCredentials.error_response());
        assert_eq!(body["errors"][0]["msg"], "Incorrect email or password");
    }

    #[test]
    fn test_validation_errors_report_first_rule_per_field() {
        let input = crate::models::UserInput {
            name: "".to_string(),
            email: "bad".to_string(),
            password: "short".to_string(),
        };
        let app_error: AppError = input.validate().unwrap_err().into();
        match app_error {
            AppError::Validation(fields) => {
                assert_eq!(fields.len(), 3);
                let params: Vec<&str> = fields.iter().map(|f| f.param.as_str()).collect();
                assert_eq!(params, vec!["email", "name", "password"]);
                let name = fields.iter().find(|f| f.param == "name").unwrap();
                assert_eq!(name.msg, "Name is required");
            }
            other => panic!("expected Validation, got {:?}", other),
        }

        // An empty time fails both the presence and the format rule; only
        // the first is reported.
        let input = crate::models::TaskInput {
            title: "t".to_string(),
            project: "p".to_string(),
            time: "".to_string(),
        };
        let app_error: AppError = input.validate().unwrap_err().into();
        match app_error {
            AppError::Validation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].msg, "Time is required");
                assert_eq!(fields[0].param, "time");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }
}
