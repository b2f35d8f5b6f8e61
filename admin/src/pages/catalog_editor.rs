use log::info;

use gateway::{Entity, Gateway, MutationOutcome};
use shared::{ImageSelection, LabelDraft, LabelForm, LabelFormChange, LabelFormErrors, Labelled};

use crate::app::AppContext;
use crate::entity::{AdminEntity, INVALID_DATA, UNABLE_LOAD_IMAGE};
use crate::pages::EditorMode;
use crate::routes::Route;

/// Editor for the label-only tables: decks, tournaments and equipment.
/// Equipment also carries a picture.
pub struct CatalogEditor<E>
where
    E: AdminEntity + Entity<Draft = LabelDraft> + Labelled,
{
    gateway: Gateway,
    ctx: AppContext,
    mode: EditorMode,
    pub form: LabelForm,
    pub errors: LabelFormErrors,
    loaded: Option<E>,
}

impl<E> CatalogEditor<E>
where
    E: AdminEntity + Entity<Draft = LabelDraft> + Labelled,
{
    pub fn new(gateway: Gateway, ctx: AppContext, mode: EditorMode) -> Self {
        Self {
            gateway,
            ctx,
            mode,
            form: LabelForm::new(E::HAS_IMAGE),
            errors: LabelFormErrors::default(),
            loaded: None,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    fn form_for(row: &E) -> LabelForm {
        LabelForm {
            label: row.label().to_string(),
            image: if E::HAS_IMAGE {
                ImageSelection::Stored(Labelled::id(row).to_string())
            } else {
                ImageSelection::None
            },
            requires_image: E::HAS_IMAGE,
        }
    }

    pub async fn load(&mut self) {
        let EditorMode::Edit(id) = self.mode.clone() else {
            return;
        };
        let _loading = self.ctx.loader.start();
        match E::api(&self.gateway).get(&id).await.into_data() {
            Some(row) => {
                self.form = Self::form_for(&row);
                self.loaded = Some(row);
            }
            None => {
                self.ctx.notifier.error(E::MESSAGES.load_failed);
            }
        }
    }

    pub fn change(&mut self, change: LabelFormChange) {
        self.errors.clear_for(&change);
        self.form.apply(change);
    }

    pub fn cancel(&mut self) {
        self.form = match &self.loaded {
            Some(row) => Self::form_for(row),
            None => LabelForm::new(E::HAS_IMAGE),
        };
        self.errors = LabelFormErrors::default();
    }

    pub async fn save(&mut self) -> Option<Route> {
        let draft = match self.form.submit() {
            Ok(draft) => draft,
            Err(errors) => {
                self.errors = errors;
                self.ctx.notifier.warning(INVALID_DATA);
                return None;
            }
        };

        let _loading = self.ctx.loader.start();
        let api = E::api(&self.gateway);
        let messages = E::MESSAGES;
        match self.mode.clone() {
            EditorMode::Create => {
                let outcome = self
                    .gateway
                    .mutations
                    .create_with_image(api, &draft, self.form.image.file())
                    .await;
                info!("Create {}: {:?}", E::SECTION, outcome);
                match outcome {
                    MutationOutcome::Completed { id } => {
                        self.ctx.notifier.success(messages.created);
                        if E::HAS_IMAGE && self.form.image.is_new() {
                            self.form.image = ImageSelection::Stored(id.clone());
                        }
                        Some(self.created(id))
                    }
                    MutationOutcome::Incomplete { id } => {
                        self.ctx.notifier.success(messages.created);
                        self.ctx.notifier.error(UNABLE_LOAD_IMAGE);
                        self.form.image = ImageSelection::None;
                        Some(self.created(id))
                    }
                    MutationOutcome::RolledBack => {
                        self.ctx.notifier.error(UNABLE_LOAD_IMAGE);
                        self.ctx.notifier.error(messages.create_failed);
                        None
                    }
                    _ => {
                        self.ctx.notifier.error(messages.create_failed);
                        None
                    }
                }
            }
            EditorMode::Edit(id) => {
                let outcome = self
                    .gateway
                    .mutations
                    .update_with_image(api, &draft, &id, &self.form.image)
                    .await;
                info!("Update {} {}: {:?}", E::SECTION, id, outcome);
                match outcome {
                    MutationOutcome::Completed { id } => {
                        self.ctx.notifier.success(messages.updated);
                        if E::HAS_IMAGE {
                            self.form.image = ImageSelection::Stored(id);
                        }
                    }
                    MutationOutcome::Incomplete { .. } => {
                        self.ctx.notifier.success(messages.updated);
                        self.ctx.notifier.error(UNABLE_LOAD_IMAGE);
                    }
                    _ => {
                        self.ctx.notifier.error(messages.update_failed);
                    }
                }
                None
            }
        }
    }

    fn created(&mut self, id: String) -> Route {
        self.mode = EditorMode::Edit(id.clone());
        Route::AdminEdit(E::SECTION, id)
    }
}
