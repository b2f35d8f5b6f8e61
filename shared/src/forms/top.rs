use chrono::NaiveDate;

use crate::models::catalog::{Deck, Tournament};
use crate::models::top::TopDraft;
use crate::validation::{validate_field, validate_object};

/// The "add top" form of the player editor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopForm {
    pub date: Option<NaiveDate>,
    pub rating: String,
    pub deck: Option<Deck>,
    pub tournament: Option<Tournament>,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TopFormChange {
    Date(Option<NaiveDate>),
    Rating(String),
    Deck(Option<Deck>),
    Tournament(Option<Tournament>),
    Location(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopFormErrors {
    pub date: Option<&'static str>,
    pub rating: Option<&'static str>,
    pub deck: Option<&'static str>,
    pub tournament: Option<&'static str>,
    pub location: Option<&'static str>,
}

impl TopFormErrors {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.rating.is_none()
            && self.deck.is_none()
            && self.tournament.is_none()
            && self.location.is_none()
    }

    pub fn clear_for(&mut self, change: &TopFormChange) {
        match change {
            TopFormChange::Date(_) => self.date = None,
            TopFormChange::Rating(_) => self.rating = None,
            TopFormChange::Deck(_) => self.deck = None,
            TopFormChange::Tournament(_) => self.tournament = None,
            TopFormChange::Location(_) => self.location = None,
        }
    }
}

impl TopForm {
    pub fn apply(&mut self, change: TopFormChange) {
        match change {
            TopFormChange::Date(value) => self.date = value,
            TopFormChange::Rating(value) => self.rating = value,
            TopFormChange::Deck(value) => self.deck = value,
            TopFormChange::Tournament(value) => self.tournament = value,
            TopFormChange::Location(value) => self.location = value,
        }
    }

    pub fn validate(&self) -> TopFormErrors {
        TopFormErrors {
            date: validate_object(self.date.as_ref()).message,
            rating: validate_field(&self.rating).message,
            deck: validate_object(self.deck.as_ref()).message,
            tournament: validate_object(self.tournament.as_ref()).message,
            location: validate_field(&self.location).message,
        }
    }

    /// Validate and build the payload for `player_id`
    pub fn submit(&self, player_id: &str) -> Result<TopDraft, TopFormErrors> {
        let errors = self.validate();
        match (self.date, &self.deck, &self.tournament) {
            (Some(date), Some(deck), Some(tournament)) if errors.is_empty() => Ok(TopDraft {
                date,
                rating: self.rating.trim().to_string(),
                deck: deck.clone(),
                tournament: tournament.clone(),
                location: self.location.trim().to_string(),
                player_id: player_id.to_string(),
            }),
            _ => Err(errors),
        }
    }
}
