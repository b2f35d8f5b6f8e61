use log::{info, warn};

use gateway::Gateway;
use shared::validation::{validate_email, INVALID_EMAIL};

use crate::app::AppContext;
use crate::auth::AuthAction;
use crate::entity::INVALID_DATA;
use crate::routes::Route;

pub const LOGIN_ERROR: &str = "loginError";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginPage {
    pub email: String,
    pub password: String,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in and keep the token. Returns where to go next on success.
    pub async fn submit(&mut self, gateway: &Gateway, ctx: &AppContext) -> Option<Route> {
        if !validate_email(&self.email).is_valid {
            ctx.notifier.warning(INVALID_EMAIL);
            return None;
        }
        if self.password.is_empty() {
            ctx.notifier.warning(INVALID_DATA);
            return None;
        }

        ctx.dispatch(AuthAction::Login);
        let _loading = ctx.loader.start();
        match gateway.auth.login(self.email.trim(), &self.password).await.into_data() {
            Some(token) => {
                info!("Logged in as {}", self.email);
                ctx.dispatch(AuthAction::LoginSuccess { token });
                self.password.clear();
                Some(Route::Admin)
            }
            None => {
                warn!("Login failed for {}", self.email);
                ctx.notifier.error(LOGIN_ERROR);
                ctx.dispatch(AuthAction::LoginError(LOGIN_ERROR));
                None
            }
        }
    }
}
