use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use shared::{Deck, Equipment, LabelDraft, Player, PlayerDraft, Top, TopDraft, Tournament};

/// A record backed by one table.
pub trait Entity: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Insert/update payload
    type Draft: Serialize + Validate + Send + Sync;

    const TABLE: &'static str;
    /// Column searched by the filtered list
    const FILTER_COLUMN: &'static str;
    /// Whether a picture keyed by the row id lives in the object store
    const HAS_IMAGE: bool;

    fn id(&self) -> &str;
}

impl Entity for Player {
    type Draft = PlayerDraft;
    const TABLE: &'static str = "players";
    const FILTER_COLUMN: &'static str = "name";
    const HAS_IMAGE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Deck {
    type Draft = LabelDraft;
    const TABLE: &'static str = "decks";
    const FILTER_COLUMN: &'static str = "label";
    const HAS_IMAGE: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Tournament {
    type Draft = LabelDraft;
    const TABLE: &'static str = "tournaments";
    const FILTER_COLUMN: &'static str = "label";
    const HAS_IMAGE: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Equipment {
    type Draft = LabelDraft;
    const TABLE: &'static str = "equipments";
    const FILTER_COLUMN: &'static str = "label";
    const HAS_IMAGE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Top {
    type Draft = TopDraft;
    const TABLE: &'static str = "tops";
    const FILTER_COLUMN: &'static str = "location";
    const HAS_IMAGE: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
}
