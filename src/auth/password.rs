use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt work factor for stored credentials. Raising it invalidates no
/// existing hashes; bcrypt embeds the cost in each hash.
pub const BCRYPT_COST: u32 = 12;

/// Hashes a plaintext password for storage. A hashing failure is a server
/// fault, never shown to the client.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored hash. `Ok(false)` is a plain
/// mismatch; `Err` means the hash could not be processed at all.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}
