pub(crate) mod repositories;
pub(crate) mod user_repository;
