pub(crate) mod error;
pub(crate) mod list_query;
pub(crate) mod page;
pub(crate) mod user;
pub(crate) mod user_query;
