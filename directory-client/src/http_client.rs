use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{DirectoryClientError, DirectoryClientResult, FieldErrors};
use crate::models::{ListUsersRequest, UsersPage};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `directory-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> DirectoryClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Базовый URL сервера.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> DirectoryClientError {
        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => return DirectoryClientError::from_reqwest(err),
        };
        decode_error_body(status, &body)
    }

    /// Запрашивает страницу пользователей `GET /api/users`.
    ///
    /// Ответ 422 превращается в [`DirectoryClientError::Validation`] с сообщениями по полям.
    pub async fn list_users(&self, query: &ListUsersRequest) -> DirectoryClientResult<UsersPage> {
        let url = self.endpoint("/api/users");

        let request = self.client.request(Method::GET, url).query(query);

        let response = request
            .send()
            .await
            .map_err(DirectoryClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<UsersPage>()
            .await
            .map_err(DirectoryClientError::from_reqwest)
    }
}

fn decode_error_body(status: StatusCode, body: &[u8]) -> DirectoryClientError {
    if status == StatusCode::UNPROCESSABLE_ENTITY
        && let Ok(errors) = serde_json::from_slice::<FieldErrors>(body)
    {
        return DirectoryClientError::Validation(errors);
    }

    let message = serde_json::from_slice::<ErrorResponseDto>(body)
        .ok()
        .and_then(|dto| dto.error);
    DirectoryClientError::from_http_status(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/").expect("client builds");
        let full = client.endpoint("/api/users");
        assert_eq!(full, "http://localhost:8080/api/users");
    }

    #[test]
    fn unprocessable_body_becomes_field_errors() {
        let body = br#"{"page":["The page field must be an integer."]}"#;

        let err = decode_error_body(StatusCode::UNPROCESSABLE_ENTITY, body);
        match err {
            DirectoryClientError::Validation(errors) => {
                assert_eq!(
                    errors.get("page"),
                    Some(&vec!["The page field must be an integer.".to_string()])
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_body_message_is_kept() {
        let body = br#"{"error":"internal error"}"#;

        let err = decode_error_body(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert!(
            matches!(err, DirectoryClientError::InvalidRequest(ref message) if message == "internal error")
        );
    }

    #[test]
    fn unreadable_body_falls_back_to_status() {
        let err = decode_error_body(StatusCode::BAD_GATEWAY, b"<html>");
        assert_eq!(
            err.to_string(),
            "invalid request: http status 502 Bad Gateway"
        );

        let err = decode_error_body(StatusCode::NOT_FOUND, br#"{"error":"not found"}"#);
        assert!(matches!(err, DirectoryClientError::NotFound));
    }
}
