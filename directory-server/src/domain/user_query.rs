use super::list_query::ListQuery;
use super::user::User;

/// Disjunctive search over users: exact id (numeric needles only),
/// or case-insensitive substring of name or email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchFilter {
    needle: String,
    exact_id: Option<i64>,
}

impl SearchFilter {
    pub(crate) fn new(search: &str) -> Option<Self> {
        let needle = search.trim();
        if needle.is_empty() {
            return None;
        }

        let exact_id = if needle.bytes().all(|b| b.is_ascii_digit()) {
            needle.parse::<i64>().ok()
        } else {
            None
        };

        Some(Self {
            needle: needle.to_string(),
            exact_id,
        })
    }

    pub(crate) fn exact_id(&self) -> Option<i64> {
        self.exact_id
    }

    /// `ILIKE` pattern with `%`, `_` and `\` escaped, wrapped in `%..%`.
    pub(crate) fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.needle.len() + 2);
        pattern.push('%');
        for ch in self.needle.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    pub(crate) fn matches(&self, user: &User) -> bool {
        if self.exact_id == Some(user.id) {
            return true;
        }
        let needle = self.needle.to_lowercase();
        user.name.to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) page: u64,
    pub(crate) limit: u64,
}

impl Pagination {
    pub(crate) fn limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    pub(crate) fn offset(&self) -> i64 {
        let offset = self.page.saturating_sub(1).saturating_mul(self.limit);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }
}

/// Datastore-independent description of one listing fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserQuery {
    pub(crate) filter: Option<SearchFilter>,
    pub(crate) pagination: Pagination,
}

impl UserQuery {
    pub(crate) fn from_list_query(query: &ListQuery) -> Self {
        Self {
            filter: query.search.as_deref().and_then(SearchFilter::new),
            pagination: Pagination {
                page: query.page,
                limit: query.limit,
            },
        }
    }
}
