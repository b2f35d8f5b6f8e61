use chrono::{Datelike, NaiveDate};
use log::debug;

use gateway::Gateway;
use shared::stats::{top_decks_for_year, tops_per_month, DeckCount};

use crate::app::AppContext;

pub const UNABLE_LOAD_TOPS: &str = "unableLoadTops";
pub const TOP_DECKS: usize = 3;

/// Figures shown on the landing page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeView {
    pub year: i32,
    pub total_tops: usize,
    pub top_decks: Vec<DeckCount>,
    pub months_current: [usize; 12],
    pub months_previous: [usize; 12],
}

impl HomeView {
    /// `today` picks the current year
    pub async fn load(gateway: &Gateway, ctx: &AppContext, today: NaiveDate) -> Option<Self> {
        let _loading = ctx.loader.start();
        let Some(tops) = gateway.tops.get_all().await.into_data() else {
            ctx.notifier.error(UNABLE_LOAD_TOPS);
            return None;
        };

        let year = today.year();
        let view = Self {
            year,
            total_tops: tops.len(),
            top_decks: top_decks_for_year(&tops, year, TOP_DECKS),
            months_current: tops_per_month(&tops, year),
            months_previous: tops_per_month(&tops, year - 1),
        };
        debug!("Home view for {}: {} tops", year, view.total_tops);
        Some(view)
    }
}
