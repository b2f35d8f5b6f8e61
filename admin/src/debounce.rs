//! Delayed search for text inputs.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::BoxFuture;
use log::debug;
use tokio::task::JoinHandle;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Runs the most recently scheduled task once `delay` has passed without a
/// newer one. Pending work is aborted on reschedule and on drop.
pub struct Debouncer {
    delay: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            handle: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Must be called from within a tokio runtime
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let mut slot = self.slot();
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.slot().take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot().as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub type SearchCallback = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// A text input whose value updates on every keystroke and whose search
/// callback fires after the typing pauses.
pub struct SearchInput {
    value: Arc<Mutex<String>>,
    changed: Arc<AtomicBool>,
    loading: Arc<AtomicBool>,
    on_search: Option<SearchCallback>,
    debouncer: Debouncer,
}

impl SearchInput {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial.into())),
            changed: Arc::new(AtomicBool::new(false)),
            loading: Arc::new(AtomicBool::new(false)),
            on_search: None,
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
        }
    }

    pub fn with_search(mut self, on_search: SearchCallback) -> Self {
        self.on_search = Some(on_search);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    pub fn value(&self) -> String {
        self.value
            .lock()
            .map(|v| v.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn input(&self, text: &str) {
        match self.value.lock() {
            Ok(mut value) => *value = text.to_string(),
            Err(poisoned) => *poisoned.into_inner() = text.to_string(),
        }

        let Some(on_search) = self.on_search.clone() else {
            return;
        };

        self.changed.store(true, Ordering::SeqCst);
        self.loading.store(true, Ordering::SeqCst);

        let changed = Arc::clone(&self.changed);
        let loading = Arc::clone(&self.loading);
        self.debouncer.schedule(async move {
            if changed.swap(false, Ordering::SeqCst) {
                debug!("Search input settled, running search");
                on_search().await;
            }
            loading.store(false, Ordering::SeqCst);
        });
    }
}
