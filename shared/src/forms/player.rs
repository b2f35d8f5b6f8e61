use chrono::NaiveDate;

use crate::forms::image::ImageSelection;
use crate::models::catalog::Deck;
use crate::models::player::{Player, PlayerDraft};
use crate::validation::{validate_email, validate_field, validate_image};

/// Editable state of the player editor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerForm {
    pub name: String,
    pub surname: String,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub favourite_card: String,
    pub favourite_deck: Option<Deck>,
    pub instagram_link: String,
    pub description: String,
    pub image: ImageSelection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerFormChange {
    Name(String),
    Surname(String),
    BirthDate(Option<NaiveDate>),
    Email(String),
    FavouriteCard(String),
    FavouriteDeck(Option<Deck>),
    InstagramLink(String),
    Description(String),
    Image(ImageSelection),
}

/// Message keys shown under the validated fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerFormErrors {
    pub name: Option<&'static str>,
    pub surname: Option<&'static str>,
    pub email: Option<&'static str>,
    pub image: Option<&'static str>,
}

impl PlayerFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none() && self.email.is_none() && self.image.is_none()
    }

    /// Drop the error of the field a change touches
    pub fn clear_for(&mut self, change: &PlayerFormChange) {
        match change {
            PlayerFormChange::Name(_) => self.name = None,
            PlayerFormChange::Surname(_) => self.surname = None,
            PlayerFormChange::Email(_) => self.email = None,
            PlayerFormChange::Image(_) => self.image = None,
            _ => {}
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl PlayerForm {
    pub fn from_player(player: &Player, image: ImageSelection) -> Self {
        Self {
            name: player.name.clone(),
            surname: player.surname.clone(),
            birth_date: player.birth_date,
            email: player.email.clone().unwrap_or_default(),
            favourite_card: player.favourite_card.clone().unwrap_or_default(),
            favourite_deck: player.favourite_deck.clone(),
            instagram_link: player.instagram_link.clone().unwrap_or_default(),
            description: player.description.clone().unwrap_or_default(),
            image,
        }
    }

    pub fn apply(&mut self, change: PlayerFormChange) {
        match change {
            PlayerFormChange::Name(value) => self.name = value,
            PlayerFormChange::Surname(value) => self.surname = value,
            PlayerFormChange::BirthDate(value) => self.birth_date = value,
            PlayerFormChange::Email(value) => self.email = value,
            PlayerFormChange::FavouriteCard(value) => self.favourite_card = value,
            PlayerFormChange::FavouriteDeck(value) => self.favourite_deck = value,
            PlayerFormChange::InstagramLink(value) => self.instagram_link = value,
            PlayerFormChange::Description(value) => self.description = value,
            PlayerFormChange::Image(value) => self.image = value,
        }
    }

    pub fn validate(&self) -> PlayerFormErrors {
        PlayerFormErrors {
            name: validate_field(&self.name).message,
            surname: validate_field(&self.surname).message,
            email: validate_email(&self.email).message,
            image: validate_image(&self.image).message,
        }
    }

    /// Validate and build the row payload
    pub fn submit(&self) -> Result<PlayerDraft, PlayerFormErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PlayerDraft {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            birth_date: self.birth_date,
            email: optional(&self.email),
            favourite_card: optional(&self.favourite_card),
            favourite_deck: self.favourite_deck.clone(),
            instagram_link: optional(&self.instagram_link),
            description: optional(&self.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::image::ImageFile;
    use crate::validation::{INVALID_EMAIL, REQUIRED_FIELD, REQUIRED_IMAGE};
    use pretty_assertions::assert_eq;

    fn filled() -> PlayerForm {
        PlayerForm {
            name: "Anna".into(),
            surname: "Rossi".into(),
            email: "anna@majin.it".into(),
            image: ImageSelection::Selected(ImageFile::new("anna.png", "image/png", vec![1, 2])),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = PlayerForm::default().validate();
        assert_eq!(
            errors,
            PlayerFormErrors {
                name: Some(REQUIRED_FIELD),
                surname: Some(REQUIRED_FIELD),
                email: Some(REQUIRED_FIELD),
                image: Some(REQUIRED_IMAGE),
            }
        );
    }

    #[test]
    fn test_change_clears_only_its_field_error() {
        let mut form = PlayerForm::default();
        let mut errors = form.validate();

        let change = PlayerFormChange::Name("Anna".into());
        errors.clear_for(&change);
        form.apply(change);

        assert_eq!(form.name, "Anna");
        assert_eq!(errors.name, None);
        assert_eq!(errors.surname, Some(REQUIRED_FIELD));
    }

    #[test]
    fn test_submit_maps_blank_optionals_to_none() {
        let mut form = filled();
        form.instagram_link = "  ".into();
        form.favourite_card = "Kashtira Fenrir".into();

        let draft = form.submit().unwrap();
        assert_eq!(draft.instagram_link, None);
        assert_eq!(draft.favourite_card.as_deref(), Some("Kashtira Fenrir"));
        assert_eq!(draft.email.as_deref(), Some("anna@majin.it"));
    }

    #[test]
    fn test_submit_rejects_bad_email() {
        let mut form = filled();
        form.apply(PlayerFormChange::Email("anna".into()));
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.email, Some(INVALID_EMAIL));
    }
}
