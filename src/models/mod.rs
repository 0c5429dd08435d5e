pub mod project;
pub mod task;
pub mod user;

pub use project::{Project, ProjectInput};
pub use task::{Task, TaskInput, TaskUpdate};
pub use user::{LoginInput, User, UserInput, UserProfile, UserUpdate};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

/// Opaque, store-assigned record identifier: 24 lowercase hex characters.
///
/// Ids are generated from 12 random bytes when a record is inserted, so they
/// carry no ordering or tenancy information. Handlers treat path ids as plain
/// strings; an id that matches no record is simply a miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        let bytes: [u8; 12] = rand::random();
        let mut hex = String::with_capacity(24);
        for b in bytes {
            // write! into a String cannot fail
            let _ = write!(hex, "{:02x}", b);
        }
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
