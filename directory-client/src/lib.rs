//! Клиентская библиотека каталога пользователей `directory-server`.
//!
//! Состав:
//! - модели ответа `GET /api/users` и параметры запроса;
//! - [`ListController`]: состояние таблицы (навигация, поиск, размер страницы,
//!   клиентская сортировка, отбрасывание устаревших ответов);
//! - форматирование дат и подписей;
//! - с фичей `http`: HTTP-клиент (`reqwest`) и асинхронная сессия [`ListSession`]
//!   с debounce поиска на tokio.
//!
//! Без фичи `http` библиотека не тянет сетевой стек и подходит для wasm-фронтенда.
#![warn(missing_docs)]

mod controller;
mod format;
mod models;
mod sort;

#[cfg(feature = "http")]
mod debounce;
#[cfg(feature = "http")]
mod error;
#[cfg(feature = "http")]
mod http_client;
#[cfg(feature = "http")]
mod session;

pub use controller::{
    ApplyOutcome, DEFAULT_PER_PAGE, FetchRequest, ListController, Navigation, PAGE_SIZE_OPTIONS,
    SEARCH_DEBOUNCE, ViewPhase,
};
pub use format::{format_registration_date, page_summary, range_summary};
pub use models::{ListUsersRequest, PageMeta, User, UsersPage};
pub use sort::{SortKey, SortOrder, SortState, sort_users};

#[cfg(feature = "http")]
pub use debounce::Debouncer;
#[cfg(feature = "http")]
pub use error::{DirectoryClientError, DirectoryClientResult, FieldErrors};
#[cfg(feature = "http")]
pub use http_client::HttpClient;
#[cfg(feature = "http")]
pub use session::ListSession;
