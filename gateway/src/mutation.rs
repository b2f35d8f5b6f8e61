//! Row changes that come with a picture. A row write and an object upload
//! can't share a transaction, so the second step is retried and, when it
//! still fails, the outcome says exactly what was left behind.

use log::{error, info, warn};

use shared::{ImageFile, ImageSelection};

use crate::config::MutationConfig;
use crate::entity::Entity;
use crate::error::GatewayResult;
use crate::images::ImageApi;
use crate::repository::TableApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompensationPolicy {
    /// Extra attempts for an image step after the first failure
    pub image_retries: u32,
    /// Delete a freshly created row when its image can't be uploaded
    pub rollback_on_failure: bool,
}

impl Default for CompensationPolicy {
    fn default() -> Self {
        Self {
            image_retries: 2,
            rollback_on_failure: true,
        }
    }
}

impl From<&MutationConfig> for CompensationPolicy {
    fn from(config: &MutationConfig) -> Self {
        Self {
            image_retries: config.image_retries,
            rollback_on_failure: config.rollback_on_failure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Row and image both in place
    Completed { id: String },
    /// The row step failed; nothing changed
    RowFailed,
    /// The row was written but its image step failed
    Incomplete { id: String },
    /// The image upload failed and the new row was deleted again
    RolledBack,
    /// The row is gone but its image is still stored
    OrphanedImage { id: String },
}

impl MutationOutcome {
    pub fn id(&self) -> Option<&str> {
        match self {
            MutationOutcome::Completed { id }
            | MutationOutcome::Incomplete { id }
            | MutationOutcome::OrphanedImage { id } => Some(id),
            MutationOutcome::RowFailed | MutationOutcome::RolledBack => None,
        }
    }

    /// Whether the row step took effect and stayed
    pub fn row_succeeded(&self) -> bool {
        self.id().is_some()
    }

    pub fn image_failed(&self) -> bool {
        matches!(
            self,
            MutationOutcome::Incomplete { .. }
                | MutationOutcome::RolledBack
                | MutationOutcome::OrphanedImage { .. }
        )
    }
}

#[derive(Clone)]
pub struct MutationCoordinator {
    images: ImageApi,
    policy: CompensationPolicy,
}

impl MutationCoordinator {
    pub fn new(images: ImageApi, policy: CompensationPolicy) -> Self {
        Self { images, policy }
    }

    pub fn policy(&self) -> CompensationPolicy {
        self.policy
    }

    /// Insert the row, then upload its picture under the new id
    pub async fn create_with_image<E: Entity>(
        &self,
        api: &TableApi<E>,
        draft: &E::Draft,
        image: Option<&ImageFile>,
    ) -> MutationOutcome {
        let Some(id) = api.create(draft).await.into_data() else {
            return MutationOutcome::RowFailed;
        };

        let Some(image) = image else {
            return MutationOutcome::Completed { id };
        };

        if self.upload(&id, image).await {
            return MutationOutcome::Completed { id };
        }

        if !self.policy.rollback_on_failure {
            warn!("{} {} created without its image", E::TABLE, id);
            return MutationOutcome::Incomplete { id };
        }

        if api.delete(&id).await.is_success() {
            info!("Rolled back {} {} after image failure", E::TABLE, id);
            MutationOutcome::RolledBack
        } else {
            error!("Rollback of {} {} failed", E::TABLE, id);
            MutationOutcome::Incomplete { id }
        }
    }

    /// Update the row and, when a new picture was picked, replace the stored one
    pub async fn update_with_image<E: Entity>(
        &self,
        api: &TableApi<E>,
        draft: &E::Draft,
        id: &str,
        image: &ImageSelection,
    ) -> MutationOutcome {
        let Some(id) = api.update(draft, id).await.into_data() else {
            return MutationOutcome::RowFailed;
        };

        let ImageSelection::Selected(file) = image else {
            return MutationOutcome::Completed { id };
        };

        if !self.retry("remove old image", &id, || self.images.try_delete(&id)).await {
            warn!("Old image of {} {} could not be removed", E::TABLE, id);
            return MutationOutcome::Incomplete { id };
        }

        if self.upload(&id, file).await {
            MutationOutcome::Completed { id }
        } else {
            MutationOutcome::Incomplete { id }
        }
    }

    /// Delete the row, then its picture for entities that have one
    pub async fn delete_with_image<E: Entity>(&self, api: &TableApi<E>, id: &str) -> MutationOutcome {
        if !api.delete(id).await.is_success() {
            return MutationOutcome::RowFailed;
        }

        let id = id.to_string();
        if !E::HAS_IMAGE {
            return MutationOutcome::Completed { id };
        }

        if self.retry("remove image", &id, || self.images.try_delete(&id)).await {
            MutationOutcome::Completed { id }
        } else {
            warn!("{} {} deleted, image left in storage", E::TABLE, id);
            MutationOutcome::OrphanedImage { id }
        }
    }

    async fn upload(&self, id: &str, image: &ImageFile) -> bool {
        self.retry("upload image", id, || self.images.try_add(id, image)).await
    }

    async fn retry<F, Fut, T>(&self, step: &str, id: &str, mut attempt: F) -> bool
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = GatewayResult<T>>,
    {
        let attempts = self.policy.image_retries + 1;
        for n in 1..=attempts {
            match attempt().await {
                Ok(_) => return true,
                Err(e) => warn!("{} for {} failed (attempt {}/{}): {}", step, id, n, attempts, e),
            }
        }
        false
    }
}
