//! Application state.

use std::sync::Arc;

use talent_i18n::{TranslationConfig, TranslationOrchestrator};
use talent_store::{
    ApplicationRepository, AuthClient, PostingRepository, SavedJobRepository, StoreClient,
    UserRepository,
};

use crate::auth::JwtVerifier;
use crate::config::ApiConfig;
use crate::services::ProfileService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub orchestrator: Arc<TranslationOrchestrator>,
    pub store: StoreClient,
    pub auth: AuthClient,
    pub jwt: Arc<JwtVerifier>,
    pub users: UserRepository,
    pub applications: ApplicationRepository,
    pub saved_jobs: SavedJobRepository,
    pub postings: PostingRepository,
    pub profiles: ProfileService,
}

impl AppState {
    /// Wire the state from already-built collaborators.
    pub fn new(config: ApiConfig, store: StoreClient, orchestrator: Arc<TranslationOrchestrator>) -> Self {
        let jwt = Arc::new(JwtVerifier::new(&config.jwt_secret, &config.jwt_audience));
        let users = UserRepository::new(store.clone());
        let profiles = ProfileService::new(Arc::clone(&orchestrator), users.clone());

        Self {
            auth: AuthClient::new(store.clone()),
            applications: ApplicationRepository::new(store.clone()),
            saved_jobs: SavedJobRepository::new(store.clone()),
            postings: PostingRepository::new(store.clone()),
            users,
            profiles,
            jwt,
            orchestrator,
            store,
            config,
        }
    }

    /// Create application state from environment variables.
    pub fn from_env(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let store = StoreClient::from_env()?;
        let translation = TranslationConfig::from_env();
        let orchestrator = TranslationOrchestrator::from_config(&translation)?;

        Ok(Self::new(config, store, Arc::new(orchestrator)))
    }
}
