use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::domain::user_query::{SearchFilter, UserQuery};

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    /// Total number of users, ignoring any search.
    async fn count_users(&self) -> Result<i64, DomainError>;
    async fn count_matching(&self, filter: Option<&SearchFilter>) -> Result<i64, DomainError>;
    /// One page of users in primary key order.
    async fn fetch_users(&self, query: &UserQuery) -> Result<Vec<User>, DomainError>;
}
