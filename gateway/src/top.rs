use log::debug;

use shared::{Envelope, Player, Top, TopDraft};

use crate::entity::Entity;
use crate::error::{GatewayError, GatewayResult};
use crate::repository::{collapse, parse_rows, payload, row_id, TableApi};
use crate::store::SelectQuery;

impl TableApi<Top> {
    /// Every top recorded for `player_id`
    pub async fn get_all_by_player(&self, player_id: &str) -> Envelope<Vec<Top>> {
        collapse(
            "get_all_by_player",
            Top::TABLE,
            self.try_get_all_by_player(player_id).await,
        )
    }

    /// Insert a top after checking its player exists
    pub async fn add(&self, draft: &TopDraft) -> Envelope<String> {
        collapse("add", Top::TABLE, self.try_add(draft).await)
    }

    pub async fn remove(&self, id: &str) -> Envelope<()> {
        self.delete(id).await
    }

    async fn try_get_all_by_player(&self, player_id: &str) -> GatewayResult<Envelope<Vec<Top>>> {
        debug!("Fetching tops of player {}", player_id);
        let selection = self
            .store()
            .select(Top::TABLE, &SelectQuery::new().eq("playerId", player_id))
            .await?;
        Ok(Envelope::success(parse_rows(selection.rows)?))
    }

    async fn try_add(&self, draft: &TopDraft) -> GatewayResult<Envelope<String>> {
        let body = payload(draft)?;
        let players = self
            .store()
            .select(Player::TABLE, &SelectQuery::new().eq("id", &draft.player_id))
            .await?;
        if players.rows.is_empty() {
            return Err(GatewayError::NotFound(format!("player {}", draft.player_id)));
        }

        let row = self.store().insert(Top::TABLE, body).await?;
        let id = row_id(&row)?;
        debug!("Added top {} for player {}", id, draft.player_id);
        Ok(Envelope::success(id))
    }
}
