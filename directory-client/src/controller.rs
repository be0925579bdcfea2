//! Состояние табличного представления списка пользователей.
//!
//! Контроллер не делает сетевых вызовов сам: каждое действие, которому нужен
//! запрос, возвращает [`FetchRequest`], а ответ передаётся обратно через
//! [`ListController::apply_page`] / [`ListController::apply_failure`].
//! Это позволяет использовать один и тот же код из tokio-сессии и из wasm.

use std::time::Duration;

use tracing::debug;

use crate::models::{ListUsersRequest, PageMeta, User, UsersPage};
use crate::sort::{SortKey, SortState, sort_users};

/// Размер страницы по умолчанию.
pub const DEFAULT_PER_PAGE: u64 = 10;
/// Размеры страницы, которые предлагает селектор.
pub const PAGE_SIZE_OPTIONS: [u64; 4] = [10, 25, 50, 100];
/// Пауза после последнего изменения поиска, прежде чем уйдёт запрос.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(600);

const PAGE_WINDOW_RADIUS: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Фаза представления.
pub enum ViewPhase {
    /// Ещё ничего не запрашивали.
    Idle,
    /// Ждём ответ на последний запрос.
    Loading,
    /// Последний запрос успешно применён.
    Loaded,
    /// Последний запрос завершился ошибкой; показываются прежние данные.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Кнопки навигации по страницам.
pub enum Navigation {
    /// Первая страница.
    First,
    /// Предыдущая страница.
    Previous,
    /// Следующая страница.
    Next,
    /// Последняя страница.
    Last,
    /// Конкретная страница.
    Page(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Запрос, который нужно выполнить, с порядковым номером.
pub struct FetchRequest {
    /// Порядковый номер; применяется только ответ на последний выданный запрос.
    pub seq: u64,
    /// Параметры `GET /api/users`.
    pub query: ListUsersRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Результат передачи ответа в контроллер.
pub enum ApplyOutcome {
    /// Ответ применён к состоянию.
    Applied,
    /// Ответ устарел (после него был выдан другой запрос) и отброшен.
    Stale,
}

#[derive(Debug, Clone)]
/// Контроллер списка пользователей.
pub struct ListController {
    users: Vec<User>,
    meta: PageMeta,
    phase: ViewPhase,
    go_to_page: String,
    go_to_page_error: Option<String>,
    per_page: u64,
    sort: SortState,
    search_term: String,
    last_issued: u64,
    last_request: Option<FetchRequest>,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new()
    }
}

impl ListController {
    /// Пустое состояние: страница 1 из 1, сортировка по id по возрастанию.
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            meta: PageMeta::default(),
            phase: ViewPhase::Idle,
            go_to_page: String::new(),
            go_to_page_error: None,
            per_page: DEFAULT_PER_PAGE,
            sort: SortState::default(),
            search_term: String::new(),
            last_issued: 0,
            last_request: None,
        }
    }

    /// Последний выданный запрос (его `seq` равен числу выданных запросов).
    pub fn last_request(&self) -> Option<&FetchRequest> {
        self.last_request.as_ref()
    }

    /// Пользователи текущей страницы в серверном порядке.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Пользователи текущей страницы в порядке активной сортировки.
    pub fn sorted_users(&self) -> Vec<User> {
        sort_users(&self.users, self.sort)
    }

    /// Метаданные последней успешно загруженной страницы.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Текущая фаза.
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Идёт ли загрузка.
    pub fn is_loading(&self) -> bool {
        self.phase == ViewPhase::Loading
    }

    /// Текст поля "Go to page".
    pub fn go_to_page_input(&self) -> &str {
        &self.go_to_page
    }

    /// Сообщение об ошибке поля "Go to page".
    pub fn go_to_page_error(&self) -> Option<&str> {
        self.go_to_page_error.as_deref()
    }

    /// Текущий размер страницы.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Активная сортировка.
    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Текущая строка поиска.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Номера страниц для кнопок: `current-2 ..= current+2` в пределах `[1, last_page]`.
    pub fn page_window(&self) -> Vec<u64> {
        let start = self
            .meta
            .current_page
            .saturating_sub(PAGE_WINDOW_RADIUS)
            .max(1);
        let end = self
            .meta
            .current_page
            .saturating_add(PAGE_WINDOW_RADIUS)
            .min(self.meta.last_page);
        (start..=end).collect()
    }

    /// Первый запрос при монтировании: страница 1, 10 на странице, без поиска.
    pub fn mount(&mut self) -> FetchRequest {
        self.issue(1, DEFAULT_PER_PAGE, String::new())
    }

    /// Навигация кнопками. Запрос за пределы `[1, last_page]` молча игнорируется.
    pub fn navigate(&mut self, navigation: Navigation) -> Option<FetchRequest> {
        let current = self.meta.current_page;
        let target = match navigation {
            Navigation::First => Some(1),
            Navigation::Previous => current.checked_sub(1),
            Navigation::Next => current.checked_add(1),
            Navigation::Last => Some(self.meta.last_page),
            Navigation::Page(page) => Some(page),
        }?;
        self.request_page(target)
    }

    /// Обновляет текст поля "Go to page".
    pub fn set_go_to_page_input(&mut self, text: impl Into<String>) {
        self.go_to_page = text.into();
    }

    /// Кнопка "Go": целое число в `[1, last_page]` уходит в запрос,
    /// иначе выставляется видимое сообщение об ошибке.
    pub fn submit_go_to_page(&mut self) -> Option<FetchRequest> {
        let last_page = self.meta.last_page;
        let target = self
            .go_to_page
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|page| (1..=last_page).contains(page));

        match target.and_then(|page| self.request_page(page)) {
            Some(request) => {
                self.go_to_page.clear();
                self.go_to_page_error = None;
                Some(request)
            }
            None => {
                self.go_to_page_error = Some(format!("Enter a number between 1 and {last_page}"));
                None
            }
        }
    }

    /// Смена размера страницы: сразу запрашивается страница 1.
    pub fn set_per_page(&mut self, per_page: u64) -> Option<FetchRequest> {
        self.per_page = per_page.max(1);
        self.request_page(1)
    }

    /// Обновляет строку поиска. Запрос не выдаётся: вызывающая сторона
    /// откладывает [`ListController::search_request`] на [`SEARCH_DEBOUNCE`].
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Очищает строку поиска; запрос уходит тем же отложенным путём.
    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    /// Отложенный запрос поиска: страница 1 с текущим размером страницы.
    pub fn search_request(&mut self) -> Option<FetchRequest> {
        self.request_page(1)
    }

    /// Клик по заголовку колонки. Пересортировывает только загруженную страницу.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
    }

    /// Применяет успешный ответ, если он относится к последнему запросу.
    pub fn apply_page(&mut self, seq: u64, page: UsersPage) -> ApplyOutcome {
        if seq != self.last_issued {
            debug!(seq, latest = self.last_issued, "stale users page discarded");
            return ApplyOutcome::Stale;
        }
        self.users = page.data;
        self.meta = page.meta;
        self.phase = ViewPhase::Loaded;
        ApplyOutcome::Applied
    }

    /// Отмечает неудачный запрос: снимается флаг загрузки, данные остаются прежними.
    pub fn apply_failure(&mut self, seq: u64) -> ApplyOutcome {
        if seq != self.last_issued {
            debug!(seq, latest = self.last_issued, "stale fetch failure discarded");
            return ApplyOutcome::Stale;
        }
        self.phase = ViewPhase::Failed;
        ApplyOutcome::Applied
    }

    fn request_page(&mut self, page: u64) -> Option<FetchRequest> {
        if page < 1 || page > self.meta.last_page {
            return None;
        }
        Some(self.issue(page, self.per_page, self.search_term.clone()))
    }

    fn issue(&mut self, page: u64, limit: u64, search: String) -> FetchRequest {
        self.last_issued += 1;
        self.phase = ViewPhase::Loading;
        let request = FetchRequest {
            seq: self.last_issued,
            query: ListUsersRequest::new(page, limit, &search),
        };
        self.last_request = Some(request.clone());
        request
    }
}

#[cfg(test)]
mod tests {
    use super::{ApplyOutcome, ListController, Navigation, ViewPhase};
    use crate::models::{PageMeta, User, UsersPage};
    use crate::sort::{SortKey, SortOrder};

    fn page(current_page: u64, last_page: u64, names: &[&str]) -> UsersPage {
        let data = names
            .iter()
            .enumerate()
            .map(|(idx, name)| User {
                id: idx as i64 + 1,
                name: name.to_string(),
                email: format!("{}@x.com", name.to_lowercase()),
                created_at: None,
            })
            .collect::<Vec<_>>();
        let per_page = 10;
        let from = if data.is_empty() {
            0
        } else {
            (current_page - 1) * per_page + 1
        };
        let to = if data.is_empty() {
            0
        } else {
            from + data.len() as u64 - 1
        };
        UsersPage {
            meta: PageMeta {
                current_page,
                last_page,
                per_page,
                total: last_page * per_page,
                from,
                to,
            },
            data,
        }
    }

    fn loaded(current_page: u64, last_page: u64) -> ListController {
        let mut controller = ListController::new();
        let request = controller.mount();
        controller.apply_page(request.seq, page(current_page, last_page, &["Anna", "Bob"]));
        controller
    }

    #[test]
    fn mount_requests_first_page_of_ten_without_search() {
        let mut controller = ListController::new();
        assert_eq!(controller.phase(), ViewPhase::Idle);

        let request = controller.mount();
        assert_eq!(request.query.page, 1);
        assert_eq!(request.query.limit, 10);
        assert_eq!(request.query.search, None);
        assert!(controller.is_loading());
        assert_eq!(controller.last_request(), Some(&request));
    }

    #[test]
    fn navigation_issues_requests_inside_range() {
        let mut controller = loaded(3, 5);

        assert_eq!(controller.navigate(Navigation::First).map(|r| r.query.page), Some(1));
        assert_eq!(controller.navigate(Navigation::Previous).map(|r| r.query.page), Some(2));
        assert_eq!(controller.navigate(Navigation::Next).map(|r| r.query.page), Some(4));
        assert_eq!(controller.navigate(Navigation::Last).map(|r| r.query.page), Some(5));
        assert_eq!(controller.navigate(Navigation::Page(4)).map(|r| r.query.page), Some(4));
    }

    #[test]
    fn out_of_range_navigation_is_silently_dropped() {
        let mut controller = loaded(1, 1);
        let seq_before = controller.navigate(Navigation::First).map(|r| r.seq);
        assert!(seq_before.is_some());
        controller.apply_page(seq_before.unwrap_or_default(), page(1, 1, &["Anna"]));

        assert!(controller.navigate(Navigation::Previous).is_none());
        assert!(controller.navigate(Navigation::Next).is_none());
        assert!(controller.navigate(Navigation::Page(0)).is_none());
        assert!(controller.navigate(Navigation::Page(2)).is_none());
        assert_eq!(controller.go_to_page_error(), None);
        assert_eq!(controller.phase(), ViewPhase::Loaded);
    }

    #[test]
    fn go_to_page_out_of_range_sets_inline_error_without_fetch() {
        let mut controller = loaded(1, 5);

        controller.set_go_to_page_input("99");
        assert!(controller.submit_go_to_page().is_none());
        assert_eq!(
            controller.go_to_page_error(),
            Some("Enter a number between 1 and 5")
        );
        assert_eq!(controller.phase(), ViewPhase::Loaded);

        controller.set_go_to_page_input("abc");
        assert!(controller.submit_go_to_page().is_none());
        assert_eq!(controller.go_to_page_input(), "abc");
    }

    #[test]
    fn go_to_page_in_range_fetches_and_clears_input_and_error() {
        let mut controller = loaded(1, 5);
        controller.set_go_to_page_input("0");
        assert!(controller.submit_go_to_page().is_none());

        controller.set_go_to_page_input(" 4 ");
        let request = controller.submit_go_to_page().expect("page 4 is in range");
        assert_eq!(request.query.page, 4);
        assert_eq!(controller.go_to_page_input(), "");
        assert_eq!(controller.go_to_page_error(), None);
    }

    #[test]
    fn per_page_change_refetches_first_page_with_current_search() {
        let mut controller = loaded(3, 5);
        controller.set_search_term("ann");

        let request = controller.set_per_page(25).expect("page 1 always exists");
        assert_eq!(request.query.page, 1);
        assert_eq!(request.query.limit, 25);
        assert_eq!(request.query.search.as_deref(), Some("ann"));
        assert_eq!(controller.per_page(), 25);
    }

    #[test]
    fn search_request_uses_page_one_and_current_page_size() {
        let mut controller = loaded(2, 3);
        controller.set_per_page(50);
        controller.set_search_term("bob");

        let request = controller.search_request().expect("page 1 always exists");
        assert_eq!(request.query.page, 1);
        assert_eq!(request.query.limit, 50);
        assert_eq!(request.query.search.as_deref(), Some("bob"));

        controller.clear_search();
        let request = controller.search_request().expect("page 1 always exists");
        assert_eq!(request.query.search, None);
    }

    #[test]
    fn sort_toggle_does_not_fetch_and_flips_direction() {
        let mut controller = loaded(3, 5);
        controller.toggle_sort(SortKey::Name);
        controller.toggle_sort(SortKey::Name);
        assert_eq!(controller.sort().order, SortOrder::Desc);
        let names: Vec<String> = controller.sorted_users().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Bob", "Anna"]);

        controller.toggle_sort(SortKey::Name);
        assert_eq!(controller.sort().key, SortKey::Name);
        assert_eq!(controller.sort().order, SortOrder::Asc);
        assert_eq!(controller.phase(), ViewPhase::Loaded);
        let names: Vec<String> = controller.sorted_users().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Anna", "Bob"]);
    }

    #[test]
    fn failure_keeps_last_data_and_clears_loading() {
        let mut controller = loaded(2, 4);
        let request = controller.navigate(Navigation::Next).expect("page 3 exists");
        assert!(controller.is_loading());

        assert_eq!(controller.apply_failure(request.seq), ApplyOutcome::Applied);
        assert!(!controller.is_loading());
        assert_eq!(controller.phase(), ViewPhase::Failed);
        assert_eq!(controller.meta().current_page, 2);
        assert_eq!(controller.users().len(), 2);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut controller = loaded(1, 5);
        let older = controller.navigate(Navigation::Page(2)).expect("page 2");
        let newer = controller.navigate(Navigation::Page(3)).expect("page 3");

        assert_eq!(
            controller.apply_page(newer.seq, page(3, 5, &["Carl"])),
            ApplyOutcome::Applied
        );
        assert_eq!(
            controller.apply_page(older.seq, page(2, 5, &["Dana"])),
            ApplyOutcome::Stale
        );
        assert_eq!(controller.meta().current_page, 3);
        assert_eq!(controller.users()[0].name, "Carl");
        assert_eq!(controller.apply_failure(older.seq), ApplyOutcome::Stale);
        assert_eq!(controller.phase(), ViewPhase::Loaded);
    }

    #[test]
    fn page_window_is_clipped_to_available_pages() {
        assert_eq!(loaded(1, 1).page_window(), vec![1]);
        assert_eq!(loaded(1, 10).page_window(), vec![1, 2, 3]);
        assert_eq!(loaded(5, 10).page_window(), vec![3, 4, 5, 6, 7]);
        assert_eq!(loaded(10, 10).page_window(), vec![8, 9, 10]);
        assert_eq!(loaded(2, 3).page_window(), vec![1, 2, 3]);
    }
}
