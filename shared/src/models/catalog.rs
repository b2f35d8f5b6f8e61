use serde::{Deserialize, Serialize};
use validator::Validate;

/// Anything shown to the user as an `{id, label}` pair: decks, tournaments
/// and equipment, or options of an autocomplete.
pub trait Labelled {
    fn id(&self) -> &str;
    fn label(&self) -> &str;
}

/// A deck archetype played at tournaments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Deck {
    #[serde(default)]
    pub id: String,
    pub label: String,
}

/// A tournament a top can be recorded for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Tournament {
    #[serde(default)]
    pub id: String,
    pub label: String,
}

/// A piece of team equipment; its picture lives in the object store under `id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Equipment {
    #[serde(default)]
    pub id: String,
    pub label: String,
}

/// Payload for creating or updating any of the labelled catalog tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LabelDraft {
    #[validate(length(min = 1, message = "Label is required"))]
    pub label: String,
}

impl LabelDraft {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

macro_rules! impl_labelled {
    ($($ty:ty),*) => {
        $(
            impl Labelled for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn label(&self) -> &str {
                    &self.label
                }
            }
        )*
    };
}

impl_labelled!(Deck, Tournament, Equipment);
