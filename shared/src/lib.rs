pub mod models {
    pub mod catalog;
    pub mod player;
    pub mod top;
}

pub mod dto {
    pub mod common;
    pub mod envelope;
}

pub mod error;
pub mod format;
pub mod forms;
pub mod stats;
pub mod validation;

// Re-export commonly used items
pub use error::{Result, SharedError};

// Re-export models
pub use models::{
    catalog::{Deck, Equipment, LabelDraft, Labelled, Tournament},
    player::{Player, PlayerDraft},
    top::{Top, TopDraft},
};

// Re-export DTOs
pub use dto::{
    common::{AuthSession, AuthUser, ErrorResponse},
    envelope::Envelope,
};

pub use forms::{
    image::{ImageFile, ImageSelection},
    label::{LabelForm, LabelFormChange, LabelFormErrors},
    player::{PlayerForm, PlayerFormChange, PlayerFormErrors},
    top::{TopForm, TopFormChange, TopFormErrors},
};
