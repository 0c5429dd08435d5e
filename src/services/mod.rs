//!
//! # Domain Services
//!
//! Services own the business decisions: credential handling and token
//! issuance for users, ownership-checked CRUD for projects and tasks. Each
//! service holds an `Arc<dyn Store>` handle injected at construction, so the
//! whole layer runs unchanged against Postgres or the in-memory test store.
//!
//! Ownership is enforced here, not in the handlers: every mutating method
//! calls [`assert_owner`] before touching the store, so no route can skip
//! the check.

pub mod project;
pub mod task;
pub mod user;

pub use project::{CascadeMode, ProjectService};
pub use task::TaskService;
pub use user::UserService;

use crate::error::AppError;
use crate::models::RecordId;

/// Rejects the request unless the requester is the resource's owner.
///
/// The owner is the id resolved from the resource (directly for a project,
/// through the parent project for a task); the requester is the identity the
/// middleware attached to the request.
pub fn assert_owner(owner: &RecordId, requester: &RecordId) -> Result<(), AppError> {
    if owner == requester {
        Ok(())
    } else {
        Err(AppError::not_authorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_owner() {
        let owner = RecordId::generate();
        let stranger = RecordId::generate();

        assert!(assert_owner(&owner, &owner).is_ok());
        assert_eq!(
            assert_owner(&owner, &stranger).unwrap_err(),
            AppError::not_authorized()
        );
    }
}
