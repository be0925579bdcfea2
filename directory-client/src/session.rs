//! Асинхронная сессия списка пользователей поверх tokio.

use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::{Mutex, watch};
use tracing::{debug, error};

use crate::controller::{
    ApplyOutcome, FetchRequest, ListController, Navigation, SEARCH_DEBOUNCE,
};
use crate::debounce::Debouncer;
use crate::error::DirectoryClientResult;
use crate::http_client::HttpClient;
use crate::sort::SortKey;

struct SessionShared {
    controller: Mutex<ListController>,
    client: HttpClient,
    updates: watch::Sender<u64>,
}

impl SessionShared {
    async fn fetch(&self, request: FetchRequest) {
        let FetchRequest { seq, query } = request;
        debug!(seq, page = query.page, limit = query.limit, "fetching users page");
        let result = self.client.list_users(&query).await;

        let mut controller = self.controller.lock().await;
        let outcome = match result {
            Ok(page) => controller.apply_page(seq, page),
            Err(err) => {
                error!(seq, error = %err, "failed to fetch users page");
                controller.apply_failure(seq)
            }
        };
        drop(controller);

        if outcome == ApplyOutcome::Applied {
            self.updates.send_modify(|version| *version += 1);
        }
    }
}

/// Сессия таблицы пользователей: контроллер, HTTP-клиент и debounce поиска.
///
/// После каждого применённого ответа номер версии в [`ListSession::subscribe`]
/// увеличивается, и подписчик может перерисовать таблицу.
pub struct ListSession {
    shared: Arc<SessionShared>,
    debouncer: StdMutex<Debouncer>,
}

impl ListSession {
    /// Создаёт сессию для сервера по адресу `base_url`.
    pub fn new(base_url: impl Into<String>) -> DirectoryClientResult<Self> {
        Ok(Self::with_client(HttpClient::new(base_url)?))
    }

    /// Создаёт сессию с готовым HTTP-клиентом.
    pub fn with_client(client: HttpClient) -> Self {
        let (updates, _) = watch::channel(0);
        Self {
            shared: Arc::new(SessionShared {
                controller: Mutex::new(ListController::new()),
                client,
                updates,
            }),
            debouncer: StdMutex::new(Debouncer::new(SEARCH_DEBOUNCE)),
        }
    }

    /// Подписка на обновления состояния.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.updates.subscribe()
    }

    /// Копия текущего состояния контроллера.
    pub async fn snapshot(&self) -> ListController {
        self.shared.controller.lock().await.clone()
    }

    /// Загружает первую страницу.
    pub async fn mount(&self) {
        let request = self.shared.controller.lock().await.mount();
        self.shared.fetch(request).await;
    }

    /// Навигация кнопками; `false`, если цель вне диапазона.
    pub async fn navigate(&self, navigation: Navigation) -> bool {
        let request = self.shared.controller.lock().await.navigate(navigation);
        self.run(request).await
    }

    /// Переход по введённому номеру страницы; `false`, если ввод отклонён.
    pub async fn go_to_page(&self, text: &str) -> bool {
        let request = {
            let mut controller = self.shared.controller.lock().await;
            controller.set_go_to_page_input(text);
            controller.submit_go_to_page()
        };
        if request.is_none() {
            self.notify();
        }
        self.run(request).await
    }

    /// Смена размера страницы.
    pub async fn set_per_page(&self, per_page: u64) -> bool {
        let request = self.shared.controller.lock().await.set_per_page(per_page);
        self.run(request).await
    }

    /// Клик по заголовку колонки: только пересортировка, без запроса.
    pub async fn toggle_sort(&self, key: SortKey) {
        self.shared.controller.lock().await.toggle_sort(key);
        self.notify();
    }

    /// Ввод строки поиска; запрос уйдёт после паузы [`SEARCH_DEBOUNCE`].
    pub async fn type_search(&self, term: &str) {
        self.shared.controller.lock().await.set_search_term(term);
        self.schedule_search();
    }

    /// Очистка поиска; запрос уходит тем же отложенным путём.
    pub async fn clear_search(&self) {
        self.shared.controller.lock().await.clear_search();
        self.schedule_search();
    }

    fn schedule_search(&self) {
        let shared = Arc::clone(&self.shared);
        self.debouncer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .schedule(async move {
                let request = shared.controller.lock().await.search_request();
                if let Some(request) = request {
                    shared.fetch(request).await;
                }
            });
    }

    async fn run(&self, request: Option<FetchRequest>) -> bool {
        match request {
            Some(request) => {
                self.shared.fetch(request).await;
                true
            }
            None => false,
        }
    }

    fn notify(&self) {
        self.shared.updates.send_modify(|version| *version += 1);
    }
}
