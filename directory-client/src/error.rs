use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Ошибки валидации сервера: поле -> список сообщений.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `directory-client`.
pub enum DirectoryClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Сервер отклонил параметры запроса (422).
    #[error("validation failed: {}", ValidationSummary(.0))]
    Validation(FieldErrors),

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Некорректный запрос или неожиданный ответ сервера.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `directory-client`.
pub type DirectoryClientResult<T> = Result<T, DirectoryClientError>;

impl DirectoryClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

struct ValidationSummary<'a>(&'a FieldErrors);

impl fmt::Display for ValidationSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
