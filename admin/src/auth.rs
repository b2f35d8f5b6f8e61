use log::{error, info};

use shared::AuthUser;

use crate::storage::{ClientStorage, TOKEN_KEY};

/// Who is signed in, as far as this client knows
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<AuthUser>,
    pub loading: bool,
    pub error: Option<&'static str>,
}

impl AuthState {
    /// A stored token counts as signed in until the server says otherwise
    pub fn restore(storage: &dyn ClientStorage) -> Self {
        let token = crate::storage::read_or_none(storage, TOKEN_KEY);
        if token.is_some() {
            info!("Restored session token from client storage");
        }
        Self {
            token,
            ..Default::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthAction {
    Login,
    LoginSuccess { token: String },
    LoginError(&'static str),
    SessionChecked(AuthUser),
    SessionExpired,
    Logout,
}

impl AuthState {
    /// Apply an action, keeping client storage in step with the token
    pub fn reduce(self, action: AuthAction, storage: &dyn ClientStorage) -> Self {
        match action {
            AuthAction::Login => Self {
                loading: true,
                error: None,
                ..self
            },
            AuthAction::LoginSuccess { token } => {
                if let Err(e) = storage.set(TOKEN_KEY, &token) {
                    error!("Failed to store token in client storage: {}", e);
                }
                Self {
                    token: Some(token),
                    user: None,
                    loading: false,
                    error: None,
                }
            }
            AuthAction::LoginError(error) => Self {
                token: None,
                user: None,
                loading: false,
                error: Some(error),
            },
            AuthAction::SessionChecked(user) => Self {
                user: Some(user),
                ..self
            },
            AuthAction::SessionExpired | AuthAction::Logout => {
                if let Err(e) = storage.remove(TOKEN_KEY) {
                    error!("Failed to remove token from client storage: {}", e);
                }
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_login_success_persists_token() {
        let storage = MemoryStorage::new();
        let state = AuthState::default()
            .reduce(AuthAction::Login, &storage)
            .reduce(AuthAction::LoginSuccess { token: "jwt".into() }, &storage);

        assert!(state.is_authenticated());
        assert!(!state.loading);
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("jwt"));
        assert_eq!(AuthState::restore(&storage).token.as_deref(), Some("jwt"));
    }

    #[test]
    fn test_expired_session_clears_storage() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "stale").unwrap();

        let state = AuthState::restore(&storage).reduce(AuthAction::SessionExpired, &storage);
        assert!(!state.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_login_error_keeps_message_key() {
        let storage = MemoryStorage::new();
        let state = AuthState::default().reduce(AuthAction::LoginError("loginError"), &storage);
        assert_eq!(state.error, Some("loginError"));
    }
}
