pub(crate) mod user_directory_service;
