use std::sync::{Arc, Mutex, MutexGuard};

use log::{info, warn};

use gateway::Gateway;

use crate::auth::{AuthAction, AuthState};
use crate::loader::Loader;
use crate::storage::{read_or_none, ClientStorage, LANGUAGE_KEY};
use crate::toast::Notifier;

pub const DEFAULT_LANGUAGE: &str = "it";

/// Everything a controller needs besides the gateway: popups, the loading
/// flag, auth state and client storage. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct AppContext {
    pub notifier: Notifier,
    pub loader: Loader,
    auth: Arc<Mutex<AuthState>>,
    storage: Arc<dyn ClientStorage>,
}

impl AppContext {
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        let auth = AuthState::restore(storage.as_ref());
        Self {
            notifier: Notifier::new(),
            loader: Loader::new(),
            auth: Arc::new(Mutex::new(auth)),
            storage,
        }
    }

    fn auth_lock(&self) -> MutexGuard<'_, AuthState> {
        self.auth.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn storage(&self) -> &dyn ClientStorage {
        self.storage.as_ref()
    }

    pub fn auth(&self) -> AuthState {
        self.auth_lock().clone()
    }

    pub fn dispatch(&self, action: AuthAction) {
        let mut state = self.auth_lock();
        let current = std::mem::take(&mut *state);
        *state = current.reduce(action, self.storage.as_ref());
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_lock().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.auth_lock().token.clone()
    }

    pub fn language(&self) -> String {
        read_or_none(self.storage(), LANGUAGE_KEY).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }

    pub fn set_language(&self, language: &str) {
        if let Err(e) = self.storage.set(LANGUAGE_KEY, language) {
            warn!("Unable to store language: {}", e);
        }
    }

    /// Verify the stored token with the server; an invalid one signs the
    /// user out. Returns whether a valid session exists.
    pub async fn check_session(&self, gateway: &Gateway) -> bool {
        let Some(token) = self.token() else {
            return false;
        };

        match gateway.auth.check_session(&token).await.into_data() {
            Some(user) => {
                info!("Session valid for {:?}", user.email);
                self.dispatch(AuthAction::SessionChecked(user));
                true
            }
            None => {
                warn!("Stored session is no longer valid");
                self.dispatch(AuthAction::SessionExpired);
                false
            }
        }
    }
}
