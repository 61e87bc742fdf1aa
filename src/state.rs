use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::database::{
    DatabaseError, DatabaseManager, FavStore, HealthCheck, ListStore, MemoryStore, PgStore, UserStore,
};
use crate::services::{AuthService, FavService, ListService, UserService};

/// Everything a handler needs, wired once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
    pub users: UserService,
    pub lists: ListService,
    pub favs: FavService,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    pub fn new<S>(config: AppConfig, store: Arc<S>) -> Self
    where
        S: UserStore + ListStore + FavStore + HealthCheck + 'static,
    {
        let tokens = TokenIssuer::from_config(&config.security);

        Self {
            auth: AuthService::new(store.clone(), tokens),
            users: UserService::new(store.clone()),
            lists: ListService::new(store.clone()),
            favs: FavService::new(store.clone(), store.clone()),
            health: store,
            config: Arc::new(config),
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// Postgres when `database.url` is set, otherwise the in-memory store.
    pub async fn connect(config: AppConfig) -> Result<Self, DatabaseError> {
        if config.database.url.is_none() {
            warn!("DATABASE_URL not set; using in-memory store, data is lost on restart");
            return Ok(Self::in_memory(config));
        }

        let pool = DatabaseManager::connect(&config.database).await?;
        info!("Using Postgres store");
        Ok(Self::new(config, Arc::new(PgStore::new(pool))))
    }
}
