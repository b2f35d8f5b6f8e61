use gateway::Gateway;
use shared::stats::{tops_by_year, Placement, YearTops};
use shared::Player;

use crate::app::AppContext;
use crate::entity::AdminEntity;
use crate::pages::home::UNABLE_LOAD_TOPS;

/// Public profile of one player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub player: Player,
    pub image_url: String,
    pub years: Vec<YearTops>,
}

impl PlayerView {
    pub async fn load(gateway: &Gateway, ctx: &AppContext, id: &str) -> Option<Self> {
        let _loading = ctx.loader.start();
        let (player, tops) = futures::join!(gateway.players.get(id), gateway.tops.get_all_by_player(id));

        let tops = tops.into_data().unwrap_or_else(|| {
            ctx.notifier.error(UNABLE_LOAD_TOPS);
            Vec::new()
        });
        let Some(player) = player.into_data() else {
            ctx.notifier.error(Player::MESSAGES.load_failed);
            return None;
        };

        Some(Self {
            image_url: gateway.images.public_url(&player.id),
            player,
            years: tops_by_year(&tops),
        })
    }

    pub fn total_tops(&self) -> usize {
        self.years.iter().map(|y| y.tops.len()).sum()
    }

    /// Rows of the tops table: year, placement and tournament
    pub fn placements(&self) -> Vec<(i32, Placement, String)> {
        self.years
            .iter()
            .flat_map(|y| {
                y.tops
                    .iter()
                    .map(move |t| (y.year, Placement::from_rating(&t.rating), t.tournament.label.clone()))
            })
            .collect()
    }
}
