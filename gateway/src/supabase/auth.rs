use async_trait::async_trait;
use log::{debug, info};
use serde_json::json;

use shared::{AuthSession, AuthUser};

use crate::error::GatewayResult;
use crate::store::AuthProvider;
use crate::supabase::{check_status, SupabaseClient};

/// GoTrue endpoints under `/auth/v1`. A verified session also becomes the
/// token the REST and storage calls are signed with.
#[derive(Clone)]
pub struct SupabaseAuth {
    client: SupabaseClient,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<AuthSession> {
        info!("Signing in {}", email);
        let response = self
            .client
            .http()
            .post(self.client.endpoint("auth/v1/token"))
            .headers(self.client.headers(None).await?)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let session: AuthSession = check_status(response).await?.json().await?;
        self.client
            .set_access_token(Some(session.access_token.clone()))
            .await;
        Ok(session)
    }

    async fn user(&self, token: &str) -> GatewayResult<AuthUser> {
        debug!("Checking session");
        let response = self
            .client
            .http()
            .get(self.client.endpoint("auth/v1/user"))
            .headers(self.client.headers(Some(token)).await?)
            .send()
            .await?;

        let user: AuthUser = check_status(response).await?.json().await?;
        self.client.set_access_token(Some(token.to_string())).await;
        Ok(user)
    }

    async fn sign_out(&self, token: &str) -> GatewayResult<()> {
        info!("Signing out");
        let response = self
            .client
            .http()
            .post(self.client.endpoint("auth/v1/logout"))
            .headers(self.client.headers(Some(token)).await?)
            .send()
            .await?;

        self.client.set_access_token(None).await;
        check_status(response).await?;
        Ok(())
    }
}
