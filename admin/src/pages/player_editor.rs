use log::{debug, info};

use gateway::{Gateway, MutationOutcome};
use shared::{
    Deck, ImageSelection, Player, PlayerForm, PlayerFormChange, PlayerFormErrors, Top, TopForm,
    TopFormChange, TopFormErrors, Tournament,
};

use crate::app::AppContext;
use crate::autocomplete::Autocomplete;
use crate::entity::{AdminEntity, INVALID_DATA, UNABLE_LOAD_IMAGE};
use crate::pages::EditorMode;
use crate::routes::Route;

pub const UNABLE_LOAD_DECKS: &str = "unableLoadDecks";
pub const UNABLE_LOAD_TOURNAMENTS: &str = "unableLoadTournaments";
pub const UNABLE_LOAD_TOPS: &str = "unableLoadTops";
pub const TOP_ADDED: &str = "topSuccessfullyAdded";
pub const UNABLE_ADD_TOP: &str = "unableAddTop";
pub const TOP_REMOVED: &str = "topRemoved";
pub const UNABLE_REMOVE_TOP: &str = "unableRemoveTop";

/// The player form of the back office, with the player's tops underneath.
pub struct PlayerEditor {
    gateway: Gateway,
    ctx: AppContext,
    mode: EditorMode,
    pub form: PlayerForm,
    pub errors: PlayerFormErrors,
    pub top_form: TopForm,
    pub top_errors: TopFormErrors,
    pub decks: Vec<Deck>,
    pub tournaments: Vec<Tournament>,
    pub tops: Vec<Top>,
    loaded: Option<Player>,
}

impl PlayerEditor {
    pub fn new(gateway: Gateway, ctx: AppContext, mode: EditorMode) -> Self {
        Self {
            gateway,
            ctx,
            mode,
            form: PlayerForm::default(),
            errors: PlayerFormErrors::default(),
            top_form: TopForm::default(),
            top_errors: TopFormErrors::default(),
            decks: Vec::new(),
            tournaments: Vec::new(),
            tops: Vec::new(),
            loaded: None,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn image_url(&self) -> Option<String> {
        match &self.form.image {
            ImageSelection::Stored(key) => Some(self.gateway.images.public_url(key)),
            _ => None,
        }
    }

    /// Options for the deck and tournament pickers, then the player and
    /// their tops together when editing.
    pub async fn load(&mut self) {
        let _loading = self.ctx.loader.start();

        match self.gateway.decks.get_all().await.into_data() {
            Some(decks) => self.decks = decks,
            None => {
                self.ctx.notifier.error(UNABLE_LOAD_DECKS);
            }
        }
        match self.gateway.tournaments.get_all().await.into_data() {
            Some(tournaments) => self.tournaments = tournaments,
            None => {
                self.ctx.notifier.error(UNABLE_LOAD_TOURNAMENTS);
            }
        }

        let EditorMode::Edit(id) = self.mode.clone() else {
            return;
        };

        let (player, tops) = futures::join!(
            self.gateway.players.get(&id),
            self.gateway.tops.get_all_by_player(&id)
        );

        match player.into_data() {
            Some(player) => {
                self.form = PlayerForm::from_player(&player, ImageSelection::Stored(player.id.clone()));
                self.loaded = Some(player);
            }
            None => {
                self.ctx.notifier.error(Player::MESSAGES.load_failed);
            }
        }
        match tops.into_data() {
            Some(tops) => self.tops = tops,
            None => {
                self.ctx.notifier.error(UNABLE_LOAD_TOPS);
            }
        }
    }

    pub fn favourite_deck_picker(&self) -> Autocomplete<Deck> {
        Autocomplete::new(self.decks.clone(), self.form.favourite_deck.clone())
    }

    pub fn top_deck_picker(&self) -> Autocomplete<Deck> {
        Autocomplete::new(self.decks.clone(), self.top_form.deck.clone())
    }

    pub fn top_tournament_picker(&self) -> Autocomplete<Tournament> {
        Autocomplete::new(self.tournaments.clone(), self.top_form.tournament.clone())
    }

    pub fn change(&mut self, change: PlayerFormChange) {
        self.errors.clear_for(&change);
        self.form.apply(change);
    }

    pub fn change_top(&mut self, change: TopFormChange) {
        self.top_errors.clear_for(&change);
        self.top_form.apply(change);
    }

    /// Back to the loaded player, or an empty form when creating
    pub fn cancel(&mut self) {
        self.form = match &self.loaded {
            Some(player) => PlayerForm::from_player(player, ImageSelection::Stored(player.id.clone())),
            None => PlayerForm::default(),
        };
        self.errors = PlayerFormErrors::default();
    }

    /// Validate and write the player with its picture. Returns the route to
    /// navigate to after a create.
    pub async fn save(&mut self) -> Option<Route> {
        let draft = match self.form.submit() {
            Ok(draft) => draft,
            Err(errors) => {
                debug!("Player form invalid: {:?}", errors);
                self.errors = errors;
                self.ctx.notifier.warning(INVALID_DATA);
                return None;
            }
        };

        let _loading = self.ctx.loader.start();
        let messages = Player::MESSAGES;
        match self.mode.clone() {
            EditorMode::Create => {
                let outcome = self
                    .gateway
                    .mutations
                    .create_with_image(&self.gateway.players, &draft, self.form.image.file())
                    .await;
                info!("Create player: {:?}", outcome);
                match outcome {
                    MutationOutcome::Completed { id } => {
                        self.ctx.notifier.success(messages.created);
                        Some(self.created(id, true))
                    }
                    MutationOutcome::Incomplete { id } => {
                        self.ctx.notifier.success(messages.created);
                        self.ctx.notifier.error(UNABLE_LOAD_IMAGE);
                        Some(self.created(id, false))
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
                    .update_with_image(&self.gateway.players, &draft, &id, &self.form.image)
                    .await;
                info!("Update player {}: {:?}", id, outcome);
                match outcome {
                    MutationOutcome::Completed { id } => {
                        self.ctx.notifier.success(messages.updated);
                        self.form.image = ImageSelection::Stored(id);
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

    fn created(&mut self, id: String, image_stored: bool) -> Route {
        self.form.image = if image_stored {
            ImageSelection::Stored(id.clone())
        } else {
            ImageSelection::None
        };
        self.mode = EditorMode::Edit(id.clone());
        Route::AdminEdit(Player::SECTION, id)
    }

    /// Record a top for the player being edited
    pub async fn add_top(&mut self) -> bool {
        let Some(player_id) = self.mode.id().map(str::to_string) else {
            self.ctx.notifier.warning(INVALID_DATA);
            return false;
        };

        let draft = match self.top_form.submit(&player_id) {
            Ok(draft) => draft,
            Err(errors) => {
                self.top_errors = errors;
                self.ctx.notifier.warning(INVALID_DATA);
                return false;
            }
        };

        let _loading = self.ctx.loader.start();
        if !self.gateway.tops.add(&draft).await.is_success() {
            self.ctx.notifier.error(UNABLE_ADD_TOP);
            return false;
        }

        self.ctx.notifier.success(TOP_ADDED);
        self.top_form = TopForm::default();
        self.top_errors = TopFormErrors::default();
        self.reload_tops(&player_id).await;
        true
    }

    pub async fn remove_top(&mut self, top_id: &str) -> bool {
        let _loading = self.ctx.loader.start();
        if !self.gateway.tops.remove(top_id).await.is_success() {
            self.ctx.notifier.error(UNABLE_REMOVE_TOP);
            return false;
        }
        self.ctx.notifier.success(TOP_REMOVED);
        self.tops.retain(|t| t.id != top_id);
        true
    }

    async fn reload_tops(&mut self, player_id: &str) {
        match self.gateway.tops.get_all_by_player(player_id).await.into_data() {
            Some(tops) => self.tops = tops,
            None => {
                self.ctx.notifier.error(UNABLE_LOAD_TOPS);
            }
        }
    }
}
