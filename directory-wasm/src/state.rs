use directory_client::{FetchRequest, ListController, SEARCH_DEBOUNCE};
use leptos::leptos_dom::helpers::{TimeoutHandle, set_timeout_with_handle};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) controller: RwSignal<ListController>,
    search_timer: StoredValue<Option<TimeoutHandle>>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            controller: RwSignal::new(ListController::new()),
            search_timer: StoredValue::new(None),
        }
    }

    /// Выполняет запрос и отдаёт ответ контроллеру; устаревшие ответы он отбросит сам.
    pub(crate) fn fetch(self, request: Option<FetchRequest>) {
        let Some(FetchRequest { seq, query }) = request else {
            return;
        };

        spawn_local(async move {
            match api::list_users(&query).await {
                Ok(page) => self.controller.update(|controller| {
                    controller.apply_page(seq, page);
                }),
                Err(err) => {
                    web_sys::console::error_1(&format!("failed to load users: {err}").into());
                    self.controller.update(|controller| {
                        controller.apply_failure(seq);
                    });
                }
            }
        });
    }

    pub(crate) fn mount(self) {
        let request = self.controller.try_update(|controller| controller.mount());
        self.fetch(request);
    }

    /// Перезапускает таймер поиска: запрос уйдёт после паузы во вводе.
    pub(crate) fn schedule_search(self) {
        self.cancel_search();

        let handle = set_timeout_with_handle(
            move || {
                self.search_timer.set_value(None);
                let request = self
                    .controller
                    .try_update(|controller| controller.search_request())
                    .flatten();
                self.fetch(request);
            },
            SEARCH_DEBOUNCE,
        );
        match handle {
            Ok(handle) => self.search_timer.set_value(Some(handle)),
            Err(err) => web_sys::console::error_1(&err),
        }
    }

    fn cancel_search(self) {
        if let Some(handle) = self.search_timer.get_value() {
            handle.clear();
        }
        self.search_timer.set_value(None);
    }
}
