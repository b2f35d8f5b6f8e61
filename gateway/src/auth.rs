use std::sync::Arc;

use log::info;

use shared::{AuthUser, Envelope};

use crate::error::GatewayResult;
use crate::repository::collapse;
use crate::store::AuthProvider;

const AUTH: &str = "auth";

#[derive(Clone)]
pub struct AuthApi {
    provider: Arc<dyn AuthProvider>,
}

impl AuthApi {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// Sign in with a password; the envelope carries the access token
    pub async fn login(&self, email: &str, password: &str) -> Envelope<String> {
        collapse("login", AUTH, self.try_login(email, password).await)
    }

    pub async fn check_session(&self, token: &str) -> Envelope<AuthUser> {
        collapse("check_session", AUTH, self.try_check_session(token).await)
    }

    pub async fn logout(&self, token: &str) -> Envelope<()> {
        collapse("logout", AUTH, self.try_logout(token).await)
    }

    async fn try_login(&self, email: &str, password: &str) -> GatewayResult<Envelope<String>> {
        let session = self.provider.sign_in(email, password).await?;
        info!("Logged in as {}", email);
        Ok(Envelope::success(session.access_token))
    }

    async fn try_check_session(&self, token: &str) -> GatewayResult<Envelope<AuthUser>> {
        Ok(Envelope::success(self.provider.user(token).await?))
    }

    async fn try_logout(&self, token: &str) -> GatewayResult<Envelope<()>> {
        self.provider.sign_out(token).await?;
        Ok(Envelope::success(()))
    }
}
