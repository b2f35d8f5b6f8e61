use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Global "something is loading" flag. Each running operation holds a
/// guard; the flag is down once every guard is dropped.
#[derive(Clone, Default)]
pub struct Loader {
    active: Arc<AtomicUsize>,
}

pub struct LoaderGuard {
    active: Arc<AtomicUsize>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> LoaderGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        LoaderGuard {
            active: Arc::clone(&self.active),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.active.load(Ordering::SeqCst) > 0
    }
}

impl Drop for LoaderGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_guards() {
        let loader = Loader::new();
        let outer = loader.start();
        let inner = loader.start();
        drop(outer);
        assert!(loader.is_loading());
        drop(inner);
        assert!(!loader.is_loading());
    }
}
