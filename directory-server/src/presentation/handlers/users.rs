use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::list_query::ListQueryInput;
use crate::domain::page::{Page, PageMeta};
use crate::domain::user::User;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

/// Raw query parameters; kept as text so the validator can report
/// non-integer values per field instead of rejecting the whole request.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ListUsersParams {
    pub(crate) page: Option<String>,
    pub(crate) limit: Option<String>,
    pub(crate) search: Option<String>,
}

impl ListUsersParams {
    /// Collects known keys from the decoded query string. A repeated key keeps its last value.
    pub(crate) fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => params.page = Some(value),
                "limit" => params.limit = Some(value),
                "search" => params.search = Some(value),
                _ => {}
            }
        }
        params
    }
}

impl From<ListUsersParams> for ListQueryInput {
    fn from(params: ListUsersParams) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            search: params.search,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PageMetaDto {
    pub(crate) current_page: u64,
    pub(crate) last_page: u64,
    pub(crate) per_page: u64,
    pub(crate) total: u64,
    pub(crate) from: u64,
    pub(crate) to: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UsersPageDto {
    pub(crate) data: Vec<UserDto>,
    pub(crate) meta: PageMetaDto,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl From<PageMeta> for PageMetaDto {
    fn from(meta: PageMeta) -> Self {
        Self {
            current_page: meta.current_page,
            last_page: meta.last_page,
            per_page: meta.per_page,
            total: meta.total,
            from: meta.from,
            to: meta.to,
        }
    }
}

impl From<Page<User>> for UsersPageDto {
    fn from(page: Page<User>) -> Self {
        let page = page.map(UserDto::from);
        Self {
            data: page.data,
            meta: PageMetaDto::from(page.meta),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(
        ("page" = Option<u64>, Query, description = "Page number (>= 1), defaults to 1"),
        ("limit" = Option<u64>, Query, description = "Users per page (>= 1, <= total users), defaults to 10"),
        ("search" = Option<String>, Query, description = "Exact id, or case-insensitive substring of name or email")
    ),
    responses(
        (status = 200, description = "Users listed", body = UsersPageDto),
        (status = 400, description = "Query string could not be decoded"),
        (status = 422, description = "Validation error, field-keyed messages"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<(StatusCode, Json<UsersPageDto>)> {
    let Query(pairs) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let params = ListUsersParams::from_pairs(pairs);
    let query = state.user_service.validate_query(params.into()).await?;
    let page = state.user_service.list_users(query).await?;

    Ok((StatusCode::OK, Json(UsersPageDto::from(page))))
}

#[cfg(test)]
mod tests {
    use super::ListUsersParams;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn repeated_keys_keep_the_last_value() {
        let params = ListUsersParams::from_pairs(pairs(&[
            ("page", "1"),
            ("search", "a"),
            ("page", "2"),
            ("search", "b"),
        ]));

        assert_eq!(params.page.as_deref(), Some("2"));
        assert_eq!(params.search.as_deref(), Some("b"));
        assert_eq!(params.limit, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let params = ListUsersParams::from_pairs(pairs(&[("sort", "name"), ("limit", "5")]));

        assert_eq!(
            params,
            ListUsersParams {
                page: None,
                limit: Some("5".to_string()),
                search: None,
            }
        );
    }
}
