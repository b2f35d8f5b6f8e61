use gateway::{Entity, Gateway, TableApi};
use shared::{Deck, Equipment, Player, Tournament};

use crate::routes::Section;

pub const INVALID_DATA: &str = "invalidData";
pub const UNABLE_LOAD_IMAGE: &str = "unableLoadImage";
pub const UNABLE_REMOVE_IMAGE: &str = "unableRemoveImage";

/// Popup keys for one section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub load_list_failed: &'static str,
    pub load_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
}

/// A table managed from the back office
pub trait AdminEntity: Entity {
    const SECTION: Section;
    const MESSAGES: Messages;

    fn api(gateway: &Gateway) -> &TableApi<Self>;

    /// What the delete confirmation names
    fn display_name(&self) -> String;
}

impl AdminEntity for Player {
    const SECTION: Section = Section::Players;
    const MESSAGES: Messages = Messages {
        load_list_failed: "unableLoadPlayers",
        load_failed: "unableLoadPlayer",
        deleted: "playerDeleted",
        delete_failed: "unableDeletePlayer",
        created: "playerSuccessfullyCreated",
        updated: "playerSuccessfullyUpdated",
        create_failed: "unableCreatePlayer",
        update_failed: "unableUpdatePlayer",
    };

    fn api(gateway: &Gateway) -> &TableApi<Self> {
        &gateway.players
    }

    fn display_name(&self) -> String {
        self.full_name()
    }
}

impl AdminEntity for Deck {
    const SECTION: Section = Section::Decks;
    const MESSAGES: Messages = Messages {
        load_list_failed: "unableLoadDecks",
        load_failed: "unableLoadDeck",
        deleted: "deckDeleted",
        delete_failed: "unableDeleteDeck",
        created: "deckSuccessfullyCreated",
        updated: "deckSuccessfullyUpdated",
        create_failed: "unableCreateDeck",
        update_failed: "unableUpdateDeck",
    };

    fn api(gateway: &Gateway) -> &TableApi<Self> {
        &gateway.decks
    }

    fn display_name(&self) -> String {
        self.label.clone()
    }
}

impl AdminEntity for Tournament {
    const SECTION: Section = Section::Tournaments;
    const MESSAGES: Messages = Messages {
        load_list_failed: "unableLoadTournaments",
        load_failed: "unableLoadTournament",
        deleted: "tournamentDeleted",
        delete_failed: "unableDeleteTournament",
        created: "tournamentSuccessfullyCreated",
        updated: "tournamentSuccessfullyUpdated",
        create_failed: "unableCreateTournament",
        update_failed: "unableUpdateTournament",
    };

    fn api(gateway: &Gateway) -> &TableApi<Self> {
        &gateway.tournaments
    }

    fn display_name(&self) -> String {
        self.label.clone()
    }
}

impl AdminEntity for Equipment {
    const SECTION: Section = Section::Equipments;
    const MESSAGES: Messages = Messages {
        load_list_failed: "unableLoadEquipments",
        load_failed: "unableLoadEquipment",
        deleted: "equipmentDeleted",
        delete_failed: "unableDeleteEquipment",
        created: "equipmentSuccessfullyCreated",
        updated: "equipmentSuccessfullyUpdated",
        create_failed: "unableCreateEquipment",
        update_failed: "unableUpdateEquipment",
    };

    fn api(gateway: &Gateway) -> &TableApi<Self> {
        &gateway.equipments
    }

    fn display_name(&self) -> String {
        self.label.clone()
    }
}
