use log::info;

use gateway::{Gateway, MutationOutcome};

use crate::app::AppContext;
use crate::entity::{AdminEntity, UNABLE_REMOVE_IMAGE};

/// The "are you sure?" modal in front of a row delete.
pub struct DeleteFlow<E: AdminEntity> {
    gateway: Gateway,
    ctx: AppContext,
    selected: Option<E>,
}

impl<E: AdminEntity> DeleteFlow<E> {
    pub fn new(gateway: Gateway, ctx: AppContext) -> Self {
        Self {
            gateway,
            ctx,
            selected: None,
        }
    }

    pub fn open(&mut self, row: E) {
        self.selected = Some(row);
    }

    pub fn cancel(&mut self) {
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&E> {
        self.selected.as_ref()
    }

    /// Close the modal and delete the selected row, then its picture.
    /// Returns whether the list should be refreshed.
    pub async fn confirm(&mut self) -> bool {
        let Some(row) = self.selected.take() else {
            return false;
        };

        let _loading = self.ctx.loader.start();
        let outcome = self
            .gateway
            .mutations
            .delete_with_image(E::api(&self.gateway), row.id())
            .await;
        info!("Delete of {} {}: {:?}", E::SECTION, row.id(), outcome);

        match outcome {
            MutationOutcome::RowFailed => {
                self.ctx.notifier.error(E::MESSAGES.delete_failed);
                false
            }
            MutationOutcome::OrphanedImage { .. } => {
                self.ctx.notifier.success(E::MESSAGES.deleted);
                self.ctx.notifier.error(UNABLE_REMOVE_IMAGE);
                true
            }
            other => {
                self.ctx.notifier.success(E::MESSAGES.deleted);
                other.row_succeeded()
            }
        }
    }
}
