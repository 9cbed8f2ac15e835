// src/application/state.rs

use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::domain::RepositoryChain;
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::{ArtifactFetcher, HttpArtifactFetcher};
use crate::services::{ResolutionService, ResolveOptions};

/// Everything a command needs to resolve artifacts.
/// All fields are Arc-wrapped so independent requests can share them.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub chain: Arc<RepositoryChain>,
    pub resolution_service: Arc<ResolutionService>,
}

impl AppState {
    /// Wire the production HTTP fetcher against a configuration
    pub fn from_config(config: &ResolverConfig) -> AppResult<Self> {
        let fetcher = Arc::new(HttpArtifactFetcher::new()?);
        Self::with_fetcher(config, fetcher)
    }

    /// Wire an arbitrary fetch capability
    pub fn with_fetcher(
        config: &ResolverConfig,
        fetcher: Arc<dyn ArtifactFetcher>,
    ) -> AppResult<Self> {
        let chain = Arc::new(config.build_chain()?);
        let event_bus = Arc::new(EventBus::new());
        let options = ResolveOptions::from_config(config)?;

        let resolution_service = Arc::new(ResolutionService::new(
            fetcher,
            Arc::clone(&event_bus),
            options,
        ));

        Ok(Self {
            event_bus,
            chain,
            resolution_service,
        })
    }
}
