use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичная модель пользователя.
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Имя.
    pub name: String,
    /// Email.
    pub email: String,
    /// Дата регистрации (UTC). Может отсутствовать у старых записей.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Метаданные страницы списка пользователей.
pub struct PageMeta {
    /// Номер текущей страницы (с 1).
    pub current_page: u64,
    /// Номер последней страницы (минимум 1).
    pub last_page: u64,
    /// Размер страницы, применённый сервером.
    #[serde(default)]
    pub per_page: u64,
    /// Общее количество найденных пользователей.
    pub total: u64,
    /// Порядковый номер первого пользователя на странице (0, если страница пуста).
    pub from: u64,
    /// Порядковый номер последнего пользователя на странице (0, если страница пуста).
    pub to: u64,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            per_page: 0,
            total: 0,
            from: 0,
            to: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Ответ `GET /api/users`: страница пользователей и метаданные.
pub struct UsersPage {
    /// Пользователи текущей страницы в серверном порядке.
    pub data: Vec<User>,
    /// Метаданные пагинации.
    pub meta: PageMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Параметры запроса списка пользователей.
pub struct ListUsersRequest {
    /// Номер страницы (с 1).
    pub page: u64,
    /// Размер страницы.
    pub limit: u64,
    /// Строка поиска; пустая строка не отправляется.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListUsersRequest {
    /// Собирает запрос; пустой поиск превращается в `None`.
    pub fn new(page: u64, limit: u64, search: &str) -> Self {
        let search = if search.is_empty() {
            None
        } else {
            Some(search.to_string())
        };
        Self {
            page,
            limit,
            search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListUsersRequest, UsersPage};

    #[test]
    fn users_page_decodes_server_envelope() {
        let body = r#"{
            "data": [
                {"id": 11, "name": "User 11", "email": "user11@example.com", "created_at": "2024-01-12T12:00:00Z"},
                {"id": 12, "name": "User 12", "email": "user12@example.com"}
            ],
            "meta": {"current_page": 2, "last_page": 2, "per_page": 10, "total": 12, "from": 11, "to": 12}
        }"#;

        let page: UsersPage = serde_json::from_str(body).expect("must decode");
        assert_eq!(page.data.len(), 2);
        assert!(page.data[0].created_at.is_some());
        assert!(page.data[1].created_at.is_none());
        assert_eq!(page.meta.from, 11);
        assert_eq!(page.meta.to, 12);
    }

    #[test]
    fn empty_search_is_not_serialized() {
        let request = ListUsersRequest::new(1, 10, "");
        let json = serde_json::to_value(&request).expect("must encode");
        assert_eq!(json, serde_json::json!({"page": 1, "limit": 10}));

        let request = ListUsersRequest::new(2, 25, "ann");
        assert_eq!(request.search.as_deref(), Some("ann"));
    }
}
