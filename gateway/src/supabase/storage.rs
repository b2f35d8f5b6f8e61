use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use serde_json::json;

use crate::error::GatewayResult;
use crate::store::ObjectStore;
use crate::supabase::{check_status, SupabaseClient};

/// Storage API bucket holding entity pictures, one object per entity id
#[derive(Clone)]
pub struct SupabaseStorage {
    client: SupabaseClient,
}

impl SupabaseStorage {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> GatewayResult<()> {
        let url = self.client.endpoint(&format!(
            "storage/v1/object/{}/{}",
            self.client.images_bucket(),
            key
        ));
        debug!("Uploading {} bytes to {}", bytes.len(), url);

        let response = self
            .client
            .http()
            .post(url)
            .headers(self.client.headers(None).await?)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> GatewayResult<()> {
        let url = self
            .client
            .endpoint(&format!("storage/v1/object/{}", self.client.images_bucket()));
        debug!("Removing {} from {}", key, url);

        let response = self
            .client
            .http()
            .delete(url)
            .headers(self.client.headers(None).await?)
            .json(&json!({ "prefixes": [key] }))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        self.client.endpoint(&format!(
            "storage/v1/object/public/{}/{}",
            self.client.images_bucket(),
            key
        ))
    }
}
