pub mod auth;
pub mod config;
pub mod entity;
pub mod error;
pub mod images;
pub mod memory;
pub mod mutation;
pub mod repository;
pub mod store;
pub mod supabase;
pub mod top;

use std::sync::Arc;

pub use auth::AuthApi;
pub use config::{Config, Environment};
pub use entity::Entity;
pub use error::{GatewayError, GatewayResult};
pub use images::ImageApi;
pub use memory::{MemoryAuth, MemoryObjectStore, MemoryStore};
pub use mutation::{CompensationPolicy, MutationCoordinator, MutationOutcome};
pub use repository::{DeckApi, EquipmentApi, PlayerApi, TableApi, TopApi, TournamentApi};
pub use store::{AuthProvider, Filter, ObjectStore, RemoteStore, SelectQuery, Selection};
pub use supabase::{SupabaseAuth, SupabaseClient, SupabaseRest, SupabaseStorage};

/// Every API the site uses, over one set of backends.
#[derive(Clone)]
pub struct Gateway {
    pub players: PlayerApi,
    pub decks: DeckApi,
    pub tournaments: TournamentApi,
    pub equipments: EquipmentApi,
    pub tops: TopApi,
    pub images: ImageApi,
    pub auth: AuthApi,
    pub mutations: MutationCoordinator,
}

impl Gateway {
    pub fn new(
        store: Arc<dyn RemoteStore>,
        objects: Arc<dyn ObjectStore>,
        auth: Arc<dyn AuthProvider>,
        policy: CompensationPolicy,
    ) -> Self {
        let images = ImageApi::new(objects);
        Self {
            players: TableApi::new(Arc::clone(&store)),
            decks: TableApi::new(Arc::clone(&store)),
            tournaments: TableApi::new(Arc::clone(&store)),
            equipments: TableApi::new(Arc::clone(&store)),
            tops: TableApi::new(store),
            mutations: MutationCoordinator::new(images.clone(), policy),
            images,
            auth: AuthApi::new(auth),
        }
    }

    /// Gateway over the Supabase project named in `config`
    pub fn from_config(config: &Config) -> GatewayResult<Self> {
        let client = SupabaseClient::new(&config.supabase)?;
        Ok(Self::new(
            Arc::new(SupabaseRest::new(client.clone())),
            Arc::new(SupabaseStorage::new(client.clone())),
            Arc::new(SupabaseAuth::new(client)),
            CompensationPolicy::from(&config.mutations),
        ))
    }

    /// Gateway over in-memory backends; the handles stay usable for seeding
    /// and failure injection.
    pub fn in_memory(
        store: &MemoryStore,
        objects: &MemoryObjectStore,
        auth: &MemoryAuth,
        policy: CompensationPolicy,
    ) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(objects.clone()),
            Arc::new(auth.clone()),
            policy,
        )
    }
}

#[cfg(test)]
mod config_tests;
