//! Aggregations over tops for the public pages.

use std::collections::BTreeSet;
use std::fmt;

use chrono::Datelike;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::catalog::Deck;
use crate::models::top::Top;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCount {
    pub deck: Deck,
    pub count: usize,
}

/// Most placed decks of `year`, best first. Decks are grouped by label. Ties
/// keep the order in which the decks first appear in `tops`.
pub fn top_decks_for_year(tops: &[Top], year: i32, limit: usize) -> Vec<DeckCount> {
    let mut counts: Vec<DeckCount> = Vec::new();
    for top in tops.iter().filter(|t| t.year() == year) {
        match counts.iter_mut().find(|c| c.deck.label == top.deck.label) {
            Some(entry) => entry.count += 1,
            None => counts.push(DeckCount {
                deck: top.deck.clone(),
                count: 1,
            }),
        }
    }
    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    debug!("Top decks for {}: {:?}", year, counts);
    counts
}

/// Number of tops in each month of `year`, January first
pub fn tops_per_month(tops: &[Top], year: i32) -> [usize; 12] {
    let mut months = [0usize; 12];
    for top in tops.iter().filter(|t| t.year() == year) {
        months[top.date.month0() as usize] += 1;
    }
    months
}

/// Distinct years with at least one top, newest first
pub fn top_years(tops: &[Top]) -> Vec<i32> {
    let years: BTreeSet<i32> = tops.iter().map(Top::year).collect();
    years.into_iter().rev().collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearTops {
    pub year: i32,
    pub tops: Vec<Top>,
}

/// Tops grouped by year, newest year first; within a year the newest date first.
pub fn tops_by_year(tops: &[Top]) -> Vec<YearTops> {
    top_years(tops)
        .into_iter()
        .map(|year| {
            let mut in_year: Vec<Top> = tops.iter().filter(|t| t.year() == year).cloned().collect();
            in_year.sort_by(|a, b| b.date.cmp(&a.date));
            YearTops { year, tops: in_year }
        })
        .collect()
}

pub fn player_top_count(tops: &[Top], player_id: &str) -> usize {
    tops.iter().filter(|t| t.player_id == player_id).count()
}

/// How a rating is shown: "Top 8"-style ratings verbatim, anything else as
/// an ordinal position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Top(String),
    Position(String),
}

impl Placement {
    pub fn from_rating(rating: &str) -> Self {
        let rating = rating.trim();
        if rating.to_lowercase().contains("top") {
            Placement::Top(rating.to_string())
        } else {
            Placement::Position(rating.to_string())
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Top(rating) => write!(f, "{}", rating),
            Placement::Position(position) => write!(f, "{}°", position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::Tournament;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn top(date: (i32, u32, u32), deck: &str, player: &str) -> Top {
        Top {
            id: format!("{}-{}-{}", deck, player, date.0),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            rating: "Top 8".into(),
            deck: Deck {
                id: deck.to_lowercase(),
                label: deck.into(),
            },
            tournament: Tournament {
                id: "r1".into(),
                label: "Regional".into(),
            },
            location: "Milano".into(),
            player_id: player.into(),
        }
    }

    fn sample() -> Vec<Top> {
        vec![
            top((2024, 1, 10), "Snake-Eye", "p1"),
            top((2024, 1, 20), "Kashtira", "p2"),
            top((2024, 3, 2), "Kashtira", "p1"),
            top((2024, 11, 30), "Tenpai", "p2"),
            top((2024, 12, 1), "Labrynth", "p3"),
            top((2023, 6, 5), "Tearlaments", "p1"),
            top((2023, 6, 6), "Tearlaments", "p1"),
            top((2023, 6, 7), "Tearlaments", "p1"),
        ]
    }

    #[test]
    fn test_top_decks_for_year_ranks_by_count_then_first_seen() {
        let ranked = top_decks_for_year(&sample(), 2024, 3);
        let labels: Vec<&str> = ranked.iter().map(|c| c.deck.label.as_str()).collect();
        assert_eq!(labels, vec!["Kashtira", "Snake-Eye", "Tenpai"]);
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn test_top_decks_for_year_groups_same_label() {
        let mut renamed = top((2024, 2, 1), "Tenpai", "p1");
        renamed.deck.id = "tenpai-old".into();
        let tops = vec![
            top((2024, 1, 10), "Kashtira", "p2"),
            top((2024, 1, 12), "Tenpai", "p2"),
            renamed,
        ];

        let ranked = top_decks_for_year(&tops, 2024, 5);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].deck.label, "Tenpai");
        assert_eq!(ranked[0].deck.id, "tenpai");
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn test_tops_per_month() {
        let months = tops_per_month(&sample(), 2024);
        assert_eq!(months, [2, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1]);
        assert_eq!(tops_per_month(&sample(), 2023)[5], 3);
    }

    #[test]
    fn test_tops_by_year_newest_first() {
        let grouped = tops_by_year(&sample());
        assert_eq!(grouped.iter().map(|g| g.year).collect::<Vec<_>>(), vec![2024, 2023]);
        assert_eq!(grouped[0].tops[0].deck.label, "Labrynth");
        assert_eq!(grouped[1].tops.len(), 3);
    }

    #[test]
    fn test_player_top_count() {
        assert_eq!(player_top_count(&sample(), "p1"), 5);
        assert_eq!(player_top_count(&sample(), "p9"), 0);
    }

    #[test]
    fn test_placement_display() {
        assert_eq!(Placement::from_rating("Top 16").to_string(), "Top 16");
        assert_eq!(Placement::from_rating("TOP 4").to_string(), "TOP 4");
        assert_eq!(Placement::from_rating("2").to_string(), "2°");
    }

    proptest! {
        #[test]
        fn test_month_buckets_sum_to_year_total(days in proptest::collection::vec(0u32..365, 0..40)) {
            let tops: Vec<Top> = days
                .iter()
                .map(|d| {
                    let date = NaiveDate::from_yo_opt(2023, d + 1).unwrap();
                    top((date.year(), date.month(), date.day()), "Kashtira", "p1")
                })
                .collect();
            let months = tops_per_month(&tops, 2023);
            prop_assert_eq!(months.iter().sum::<usize>(), tops.len());
        }
    }
}
