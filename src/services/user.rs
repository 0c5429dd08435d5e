use crate::auth::{generate_token, hash_password, verify_password};
use crate::error::AppError;
use crate::models::{RecordId, UserProfile, UserUpdate};
use crate::store::{NewUser, Store};
use std::sync::Arc;

/// User lifecycle and authentication decisions. Sole consumer of the
/// password hasher and the token signer for user-related operations.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Hashes the password and persists a new user, returning its id.
    ///
    /// Does not check email uniqueness; callers look the email up first.
    pub async fn create_user(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<RecordId, AppError> {
        let password_hash = hash_password(&password)?;
        let user = self
            .store
            .insert_user(NewUser {
                name,
                email,
                password_hash,
            })
            .await?;
        Ok(user.id)
    }

    /// Returns the user's public projection, with the password hash stripped.
    pub async fn get_user_by_id(&self, id: &RecordId) -> Result<Option<UserProfile>, AppError> {
        Ok(self.store.find_user_by_id(id).await?.map(UserProfile::from))
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self
            .store
            .find_user_by_email(email)
            .await?
            .map(UserProfile::from))
    }

    /// Replaces a user's fields, hashing the new password. Not exposed over
    /// HTTP; kept for administrative use.
    pub async fn update_user(
        &self,
        id: &RecordId,
        name: String,
        email: String,
        password: String,
    ) -> Result<Option<UserProfile>, AppError> {
        let password_hash = hash_password(&password)?;
        Ok(self
            .store
            .update_user(
                id,
                UserUpdate {
                    name,
                    email,
                    password_hash,
                },
            )
            .await?
            .map(UserProfile::from))
    }

    /// Deletes a user, returning the removed profile. Not exposed over HTTP.
    pub async fn delete_user(&self, id: &RecordId) -> Result<Option<UserProfile>, AppError> {
        Ok(self.store.delete_user(id).await?.map(UserProfile::from))
    }

    /// Signs a fresh auth token for the given user id.
    pub fn create_auth_token(&self, user_id: &RecordId) -> Result<String, AppError> {
        generate_token(user_id)
    }

    /// Authenticates by email and password, returning a fresh token.
    ///
    /// Unknown email and wrong password produce the identical
    /// `InvalidCredentials` outcome so account existence never leaks.
    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        self.create_auth_token(&user.id)
    }
}
