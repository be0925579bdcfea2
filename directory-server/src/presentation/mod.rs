use std::sync::Arc;

use crate::application::user_directory_service::UserDirectoryService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) user_service: Arc<UserDirectoryService>,
}

impl AppState {
    pub(crate) fn new(user_service: Arc<UserDirectoryService>) -> Self {
        Self { user_service }
    }
}
