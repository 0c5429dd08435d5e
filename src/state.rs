use crate::services::{CascadeMode, ProjectService, TaskService, UserService};
use crate::store::Store;
use std::sync::Arc;

/// Shared application state handed to every worker: the three services plus
/// the raw store handle the middleware needs for the optional token-subject
/// check. Cloning is cheap; everything inside is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub projects: ProjectService,
    pub tasks: TaskService,
    pub store: Arc<dyn Store>,
    pub check_token_subject: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, cascade: CascadeMode, check_token_subject: bool) -> Self {
        Self {
            users: UserService::new(store.clone()),
            projects: ProjectService::new(store.clone(), cascade),
            tasks: TaskService::new(store.clone()),
            store,
            check_token_subject,
        }
    }
}
