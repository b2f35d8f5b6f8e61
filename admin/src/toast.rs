use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::debug;
use tokio::time::Instant;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastType {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastType::Success => "✓",
            ToastType::Error => "✕",
            ToastType::Warning => "⚠",
            ToastType::Info => "ℹ",
        }
    }
}

/// A transient popup. `message` is a translation key, not display text.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub toast_type: ToastType,
    pub duration: Option<u32>, // milliseconds, None for manual dismiss
    pub created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            toast_type,
            duration: Some(5000),
            created_at: Instant::now(),
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn persistent(mut self) -> Self {
        self.duration = None;
        self
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        match self.duration {
            Some(ms) => now.duration_since(self.created_at) >= Duration::from_millis(ms as u64),
            None => false,
        }
    }
}

/// Shared queue of popups raised by the controllers
#[derive(Clone, Default)]
pub struct Notifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, toast: Toast) -> Uuid {
        debug!("Toast {:?}: {}", toast.toast_type, toast.message);
        let id = toast.id;
        self.lock().push(toast);
        id
    }

    pub fn success(&self, key: &str) -> Uuid {
        self.push(Toast::new(key, ToastType::Success))
    }

    pub fn error(&self, key: &str) -> Uuid {
        self.push(Toast::new(key, ToastType::Error))
    }

    pub fn warning(&self, key: &str) -> Uuid {
        self.push(Toast::new(key, ToastType::Warning))
    }

    pub fn info(&self, key: &str) -> Uuid {
        self.push(Toast::new(key, ToastType::Info))
    }

    pub fn dismiss(&self, id: Uuid) {
        self.lock().retain(|t| t.id != id);
    }

    /// Toasts still on screen; expired ones are dropped
    pub fn active(&self) -> Vec<Toast> {
        let now = Instant::now();
        let mut toasts = self.lock();
        toasts.retain(|t| !t.is_expired(now));
        toasts.clone()
    }

    /// Message keys raised so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|t| t.message.clone()).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
