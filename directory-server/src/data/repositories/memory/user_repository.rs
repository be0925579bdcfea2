use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::domain::user_query::{SearchFilter, UserQuery};

/// Vec-backed repository with the same filtering and ordering rules as Postgres.
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub(crate) fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    /// `count` users named `User N` / `userN@example.com`, one day apart.
    pub(crate) fn seeded(count: i64) -> Self {
        let base = Utc
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .expect("valid base timestamp");
        let users = (1..=count)
            .map(|id| {
                User::new(
                    id,
                    format!("User {id}"),
                    format!("user{id}@example.com"),
                    base + Duration::days(id),
                )
                .expect("seed user must be valid")
            })
            .collect();
        Self::with_users(users)
    }

    fn matching(&self, filter: Option<&SearchFilter>) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .filter(|user| filter.is_none_or(|filter| filter.matches(user)))
            .cloned()
            .collect();
        users.sort_by_key(|user| user.id);
        users
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn count_users(&self) -> Result<i64, DomainError> {
        Ok(self.users.lock().expect("users mutex poisoned").len() as i64)
    }

    async fn count_matching(&self, filter: Option<&SearchFilter>) -> Result<i64, DomainError> {
        Ok(self.matching(filter).len() as i64)
    }

    async fn fetch_users(&self, query: &UserQuery) -> Result<Vec<User>, DomainError> {
        let offset = usize::try_from(query.pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.pagination.limit()).unwrap_or(usize::MAX);

        Ok(self
            .matching(query.filter.as_ref())
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }
}
