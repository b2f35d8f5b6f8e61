//! HTTP implementations of the store traits against a Supabase project.

pub mod auth;
pub mod rest;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tokio::sync::RwLock;

use crate::config::SupabaseConfig;
use crate::error::{GatewayError, GatewayResult};

pub use auth::SupabaseAuth;
pub use rest::SupabaseRest;
pub use storage::SupabaseStorage;

/// Connection shared by the REST, storage and auth services. Requests are
/// signed with the user's access token once a session is known, with the
/// anonymous key otherwise.
#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    images_bucket: String,
    client: reqwest::Client,
    access_token: Arc<RwLock<Option<String>>>,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        info!("Supabase client for {} (bucket '{}')", config.url, config.images_bucket);

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            images_bucket: config.images_bucket.clone(),
            client,
            access_token: Arc::default(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn images_bucket(&self) -> &str {
        &self.images_bucket
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn set_access_token(&self, token: Option<String>) {
        debug!("Supabase access token {}", if token.is_some() { "set" } else { "cleared" });
        *self.access_token.write().await = token;
    }

    /// `apikey` plus a bearer token; `token` overrides the stored session
    pub async fn headers(&self, token: Option<&str>) -> GatewayResult<HeaderMap> {
        let bearer = match token {
            Some(token) => token.to_string(),
            None => self
                .access_token
                .read()
                .await
                .clone()
                .unwrap_or_else(|| self.anon_key.clone()),
        };

        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&self.anon_key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", bearer))?);
        Ok(headers)
    }
}

fn header_value(value: &str) -> GatewayResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| GatewayError::Config(format!("invalid header value: {}", e)))
}

/// Turn a non-success response into a `Remote`/`Unauthorized` error
pub(crate) async fn check_status(response: reqwest::Response) -> GatewayResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!("Supabase answered {}: {}", status, body);
    Err(GatewayError::from_response_body(status.as_u16(), &body))
}
