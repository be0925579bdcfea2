use axum::Router;

use super::AppState;

pub(crate) mod users;

pub(crate) fn router() -> Router<AppState> {
    Router::new().nest("/api/users", users::router())
}
