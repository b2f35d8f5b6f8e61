use std::sync::Arc;

use log::debug;

use shared::{Envelope, ImageFile};

use crate::error::GatewayResult;
use crate::repository::collapse;
use crate::store::ObjectStore;

const BUCKET: &str = "images";

/// Entity pictures, stored under the id of the row they belong to
#[derive(Clone)]
pub struct ImageApi {
    objects: Arc<dyn ObjectStore>,
}

impl ImageApi {
    pub fn new(objects: Arc<dyn ObjectStore>) -> Self {
        Self { objects }
    }

    pub async fn add(&self, id: &str, image: &ImageFile) -> Envelope<()> {
        collapse("add", BUCKET, self.try_add(id, image).await)
    }

    pub async fn delete(&self, id: &str) -> Envelope<()> {
        collapse("delete", BUCKET, self.try_delete(id).await)
    }

    pub fn public_url(&self, id: &str) -> String {
        self.objects.public_url(id)
    }

    pub(crate) async fn try_add(&self, id: &str, image: &ImageFile) -> GatewayResult<Envelope<()>> {
        debug!("Uploading image {} ({}, {} bytes)", id, image.content_type, image.bytes.len());
        self.objects
            .upload(id, image.bytes.clone(), &image.content_type)
            .await?;
        Ok(Envelope::success(()))
    }

    pub(crate) async fn try_delete(&self, id: &str) -> GatewayResult<Envelope<()>> {
        debug!("Removing image {}", id);
        self.objects.remove(id).await?;
        Ok(Envelope::success(()))
    }
}
