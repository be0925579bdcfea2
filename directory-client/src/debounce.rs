use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Отложенный запуск задачи: каждый новый `schedule` отменяет предыдущую.
///
/// Одновременно ожидает не более одной задачи.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Создаёт debouncer с заданной задержкой.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Задержка перед запуском.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Планирует `task` через `delay`, отменяя ранее запланированную задачу.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Отменяет запланированную задачу, если она есть.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Есть ли задача, которая ещё не завершилась.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
