use std::sync::Arc;

use tracing::debug;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::list_query::{ListQuery, ListQueryInput};
use crate::domain::page::Page;
use crate::domain::user::User;
use crate::domain::user_query::UserQuery;

pub(crate) struct UserDirectoryService {
    repo: Arc<dyn UserRepository>,
    default_limit: u64,
}

impl UserDirectoryService {
    pub(crate) fn new(repo: Arc<dyn UserRepository>, default_limit: u64) -> Self {
        Self {
            repo,
            default_limit: default_limit.max(1),
        }
    }

    /// Validates raw list parameters against the live user count.
    pub(crate) async fn validate_query(
        &self,
        input: ListQueryInput,
    ) -> Result<ListQuery, DomainError> {
        let total_users = self.repo.count_users().await?;

        input
            .validate(self.default_limit, total_users)
            .map_err(DomainError::InvalidQuery)
    }

    pub(crate) async fn list_users(&self, query: ListQuery) -> Result<Page<User>, DomainError> {
        let user_query = UserQuery::from_list_query(&query);

        let total = self.repo.count_matching(user_query.filter.as_ref()).await?;
        let users = self.repo.fetch_users(&user_query).await?;
        debug!(
            page = query.page,
            limit = query.limit,
            search = ?query.search,
            total,
            returned = users.len(),
            "users listed"
        );

        Ok(Page::new(
            users,
            query.page,
            query.limit,
            u64::try_from(total).unwrap_or(0),
        ))
    }
}
