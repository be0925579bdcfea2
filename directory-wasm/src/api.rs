use std::collections::BTreeMap;

use directory_client::{ListUsersRequest, UsersPage};
use gloo_net::http::Request;

const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:8080",
};

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Validation(BTreeMap<String, Vec<String>>),
    Http { status: u16, message: String },
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Validation(errors) => write!(f, "validation error: {errors:?}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn parse_error_body(response: gloo_net::http::Response) -> ApiError {
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "request failed".to_string());

    if status == 422
        && let Ok(errors) = serde_json::from_str::<BTreeMap<String, Vec<String>>>(&text)
    {
        return ApiError::Validation(errors);
    }

    let fallback = match status {
        404 => "Ресурс не найден".to_string(),
        500..=599 => "Ошибка сервера".to_string(),
        _ => format!("HTTP ошибка {status}"),
    };

    let message = if text.trim().is_empty() { fallback } else { text };

    ApiError::Http { status, message }
}

pub(crate) async fn list_users(query: &ListUsersRequest) -> Result<UsersPage, ApiError> {
    let page = query.page.to_string();
    let limit = query.limit.to_string();
    let mut params = vec![("page", page.as_str()), ("limit", limit.as_str())];
    if let Some(search) = query.search.as_deref() {
        params.push(("search", search));
    }

    let response = Request::get(&endpoint("/api/users"))
        .query(params)
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    response
        .json::<UsersPage>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}
