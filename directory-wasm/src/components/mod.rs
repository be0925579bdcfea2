pub(crate) mod users_table;
