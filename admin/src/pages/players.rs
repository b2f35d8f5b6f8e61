use log::debug;

use gateway::Gateway;
use shared::stats::player_top_count;
use shared::{Player, Top};

use crate::app::AppContext;
use crate::pages::home::UNABLE_LOAD_TOPS;

pub const UNABLE_LOAD_PLAYERS: &str = "unableLoadPlayers";

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCard {
    pub player: Player,
    pub image_url: String,
    pub tops: usize,
}

/// The public roster. Filtering happens locally over the loaded players.
#[derive(Debug, Clone, Default)]
pub struct PlayersView {
    players: Vec<Player>,
    tops: Vec<Top>,
    filter: String,
}

impl PlayersView {
    pub async fn load(gateway: &Gateway, ctx: &AppContext) -> Self {
        let _loading = ctx.loader.start();
        let (players, tops) = futures::join!(gateway.players.get_all(), gateway.tops.get_all());

        let players = players.into_data().unwrap_or_else(|| {
            ctx.notifier.error(UNABLE_LOAD_PLAYERS);
            Vec::new()
        });
        let tops = tops.into_data().unwrap_or_else(|| {
            ctx.notifier.error(UNABLE_LOAD_TOPS);
            Vec::new()
        });
        debug!("Loaded {} players and {} tops", players.len(), tops.len());

        Self {
            players,
            tops,
            filter: String::new(),
        }
    }

    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.trim().to_lowercase();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn cards(&self, gateway: &Gateway) -> Vec<PlayerCard> {
        self.players
            .iter()
            .filter(|p| self.filter.is_empty() || p.name.to_lowercase().contains(&self.filter))
            .map(|p| PlayerCard {
                player: p.clone(),
                image_url: gateway.images.public_url(&p.id),
                tops: player_top_count(&self.tops, &p.id),
            })
            .collect()
    }
}
