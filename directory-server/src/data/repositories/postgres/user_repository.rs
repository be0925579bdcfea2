use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::domain::user_query::{SearchFilter, UserQuery};

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn count_users(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_user_db_error)
    }

    async fn count_matching(&self, filter: Option<&SearchFilter>) -> Result<i64, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_search_filter(&mut builder, filter);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_user_db_error)
    }

    async fn fetch_users(&self, query: &UserQuery) -> Result<Vec<User>, DomainError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT id, name, email, created_at FROM users");
        push_search_filter(&mut builder, query.filter.as_ref());
        builder
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(query.pagination.limit())
            .push(" OFFSET ")
            .push_bind(query.pagination.offset());

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        rows.into_iter().map(map_row_to_user).collect()
    }
}

fn push_search_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: Option<&SearchFilter>) {
    let Some(filter) = filter else {
        return;
    };

    let pattern = filter.like_pattern();
    builder.push(" WHERE (");
    if let Some(id) = filter.exact_id() {
        builder.push("id = ").push_bind(id).push(" OR ");
    }
    builder
        .push("name ILIKE ")
        .push_bind(pattern.clone())
        .push(" OR email ILIKE ")
        .push_bind(pattern)
        .push(")");
}

fn map_row_to_user(row: UserRow) -> Result<User, DomainError> {
    User::new(row.id, row.name, row.email, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}
