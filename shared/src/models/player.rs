use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::format::optional_date_value;
use crate::models::catalog::Deck;

/// A team member as stored in the `players` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Server-assigned row id
    #[serde(default)]
    pub id: String,

    pub name: String,

    pub surname: String,

    #[serde(default, with = "optional_date_value")]
    pub birth_date: Option<NaiveDate>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub favourite_card: Option<String>,

    /// Embedded reference, not a foreign key
    #[serde(default)]
    pub favourite_deck: Option<Deck>,

    #[serde(default)]
    pub instagram_link: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Insert/update payload for `players`; carries no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDraft {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Surname is required"))]
    pub surname: String,

    #[serde(default, with = "optional_date_value")]
    pub birth_date: Option<NaiveDate>,

    #[validate(email)]
    pub email: Option<String>,

    pub favourite_card: Option<String>,

    pub favourite_deck: Option<Deck>,

    pub instagram_link: Option<String>,

    pub description: Option<String>,
}

impl PlayerDraft {
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            ..Default::default()
        }
    }
}

impl From<&Player> for PlayerDraft {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            surname: player.surname.clone(),
            birth_date: player.birth_date,
            email: player.email.clone(),
            favourite_card: player.favourite_card.clone(),
            favourite_deck: player.favourite_deck.clone(),
            instagram_link: player.instagram_link.clone(),
            description: player.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_player_row_uses_camel_case_columns() {
        let row = serde_json::json!({
            "id": "p1",
            "name": "Anna",
            "surname": "Rossi",
            "birthDate": "1999-04-12",
            "favouriteDeck": {"id": "d1", "label": "Kashtira"},
            "instagramLink": null
        });

        let player: Player = serde_json::from_value(row).unwrap();
        assert_eq!(player.birth_date, NaiveDate::from_ymd_opt(1999, 4, 12));
        assert_eq!(player.favourite_deck.unwrap().label, "Kashtira");
        assert_eq!(player.instagram_link, None);
        assert_eq!(player.email, None);
    }

    #[test]
    fn test_player_row_with_picker_birth_date() {
        let row = serde_json::json!({
            "id": "p1",
            "name": "Anna",
            "surname": "Rossi",
            "birthDate": {"calendar": {"identifier": "gregory"}, "era": "AD", "year": 1999, "month": 4, "day": 12}
        });

        let player: Player = serde_json::from_value(row).unwrap();
        assert_eq!(player.birth_date, NaiveDate::from_ymd_opt(1999, 4, 12));

        let draft = PlayerDraft::from(&player);
        let written = serde_json::to_value(&draft).unwrap();
        assert_eq!(written["birthDate"]["year"], 1999);
        assert_eq!(written["birthDate"]["month"], 4);
        assert_eq!(written["birthDate"]["day"], 12);
    }

    #[test]
    fn test_draft_rejects_malformed_email() {
        let mut draft = PlayerDraft::new("Anna", "Rossi");
        assert!(draft.validate().is_ok());

        draft.email = Some("not-an-email".to_string());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_draft_serializes_without_id() {
        let draft = PlayerDraft::new("Mark", "Bianchi");
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["surname"], "Bianchi");
    }
}
