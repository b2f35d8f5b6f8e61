use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::format::date_value;
use crate::models::catalog::{Deck, Tournament};

/// A placement recorded for a player at a tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Top {
    #[serde(default)]
    pub id: String,
    #[serde(with = "date_value")]
    pub date: NaiveDate,
    /// Free placement text such as "Top 8" or "1"
    pub rating: String,
    pub deck: Deck,
    pub tournament: Tournament,
    #[serde(default)]
    pub location: String,
    pub player_id: String,
}

impl Top {
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Insert payload for `tops`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TopDraft {
    #[serde(with = "date_value")]
    pub date: NaiveDate,

    #[validate(length(min = 1, message = "Rating is required"))]
    pub rating: String,

    pub deck: Deck,

    pub tournament: Tournament,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(length(min = 1, message = "A top must belong to a player"))]
    pub player_id: String,
}
