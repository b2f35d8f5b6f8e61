use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, error};
use serde_json::Value;
use validator::Validate;

use shared::{Deck, Envelope, Equipment, Player, Top, Tournament};

use crate::entity::Entity;
use crate::error::{GatewayError, GatewayResult};
use crate::store::{RemoteStore, SelectQuery};

/// CRUD over one table. Every operation answers with an [`Envelope`]; the
/// underlying error is logged and dropped.
pub struct TableApi<E: Entity> {
    store: Arc<dyn RemoteStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for TableApi<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

pub type PlayerApi = TableApi<Player>;
pub type DeckApi = TableApi<Deck>;
pub type TournamentApi = TableApi<Tournament>;
pub type EquipmentApi = TableApi<Equipment>;
pub type TopApi = TableApi<Top>;

/// Log a failed call and turn the result into an envelope
pub(crate) fn collapse<T>(operation: &str, table: &str, result: GatewayResult<Envelope<T>>) -> Envelope<T> {
    match result {
        Ok(envelope) => envelope,
        Err(e) => {
            error!("{} on {} failed: {}", operation, table, e);
            Envelope::failure()
        }
    }
}

pub(crate) fn parse_rows<E: Entity>(rows: Vec<Value>) -> GatewayResult<Vec<E>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(GatewayError::from))
        .collect()
}

pub(crate) fn row_id(row: &Value) -> GatewayResult<String> {
    match row.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(GatewayError::NotFound("row without id".into())),
    }
}

/// Validated JSON payload without `id`; ids are assigned by the server
pub(crate) fn payload<D: serde::Serialize + Validate>(draft: &D) -> GatewayResult<Value> {
    draft.validate()?;
    let mut value = serde_json::to_value(draft)?;
    if let Some(object) = value.as_object_mut() {
        object.remove("id");
    }
    Ok(value)
}

impl<E: Entity> TableApi<E> {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub(crate) fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    pub async fn get_all(&self) -> Envelope<Vec<E>> {
        collapse("get_all", E::TABLE, self.try_get_all().await)
    }

    /// One page of rows whose filter column contains `text`, any case,
    /// with the exact number of matching rows.
    pub async fn get_all_with_filters(&self, from: i64, to: i64, text: &str) -> Envelope<Vec<E>> {
        collapse(
            "get_all_with_filters",
            E::TABLE,
            self.try_get_all_with_filters(from, to, text).await,
        )
    }

    pub async fn get(&self, id: &str) -> Envelope<E> {
        collapse("get", E::TABLE, self.try_get(id).await)
    }

    /// Insert a row; the envelope carries the new id
    pub async fn create(&self, draft: &E::Draft) -> Envelope<String> {
        collapse("create", E::TABLE, self.try_create(draft).await)
    }

    pub async fn update(&self, draft: &E::Draft, id: &str) -> Envelope<String> {
        collapse("update", E::TABLE, self.try_update(draft, id).await)
    }

    pub async fn delete(&self, id: &str) -> Envelope<()> {
        collapse("delete", E::TABLE, self.try_delete(id).await)
    }

    async fn try_get_all(&self) -> GatewayResult<Envelope<Vec<E>>> {
        debug!("Fetching all rows of {}", E::TABLE);
        let selection = self.store.select(E::TABLE, &SelectQuery::new()).await?;
        Ok(Envelope::success(parse_rows(selection.rows)?))
    }

    async fn try_get_all_with_filters(
        &self,
        from: i64,
        to: i64,
        text: &str,
    ) -> GatewayResult<Envelope<Vec<E>>> {
        if from < 0 || to < from {
            return Err(GatewayError::InvalidRange { from, to });
        }
        debug!(
            "Fetching {} rows {}..={} where {} contains '{}'",
            E::TABLE,
            from,
            to,
            E::FILTER_COLUMN,
            text
        );

        let query = SelectQuery::new()
            .ilike_contains(E::FILTER_COLUMN, text)
            .range(from as u64, to as u64)
            .exact_count();
        let selection = self.store.select(E::TABLE, &query).await?;
        let total = selection.count.unwrap_or(selection.rows.len() as u64);
        Ok(Envelope::success_with_total(parse_rows(selection.rows)?, total))
    }

    async fn try_get(&self, id: &str) -> GatewayResult<Envelope<E>> {
        debug!("Fetching {} {}", E::TABLE, id);
        let selection = self
            .store
            .select(E::TABLE, &SelectQuery::new().eq("id", id))
            .await?;
        let row = selection
            .rows
            .into_iter()
            .next()
            .ok_or_else(|| not_found(E::TABLE, id))?;
        Ok(Envelope::success(serde_json::from_value(row)?))
    }

    async fn try_create(&self, draft: &E::Draft) -> GatewayResult<Envelope<String>> {
        let row = self.store.insert(E::TABLE, payload(draft)?).await?;
        let id = row_id(&row)?;
        debug!("Created {} {}", E::TABLE, id);
        Ok(Envelope::success(id))
    }

    async fn try_update(&self, draft: &E::Draft, id: &str) -> GatewayResult<Envelope<String>> {
        let rows = self.store.update(E::TABLE, id, payload(draft)?).await?;
        let row = rows.first().ok_or_else(|| not_found(E::TABLE, id))?;
        debug!("Updated {} {}", E::TABLE, id);
        Ok(Envelope::success(row_id(row)?))
    }

    async fn try_delete(&self, id: &str) -> GatewayResult<Envelope<()>> {
        self.store.delete(E::TABLE, id).await?;
        debug!("Deleted {} {}", E::TABLE, id);
        Ok(Envelope::success(()))
    }
}

fn not_found(table: &str, id: impl Display) -> GatewayError {
    GatewayError::NotFound(format!("{} {}", table, id))
}
