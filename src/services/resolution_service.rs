// src/services/resolution_service.rs
//
// Resolution Service
//
// Walks a repository chain for one dependency and produces a report.
//
// CRITICAL RULES:
// - Endpoints are tried strictly in chain order, one at a time
// - The first successful fetch wins; later endpoints are never consulted
// - Per-endpoint failures (including timeouts) are recorded, never raised
// - Configuration and coordinate errors fail before any fetch
// - Cancellation aborts the in-flight fetch and is NOT a failure report
// - Every request stores into its own workspace

use chrono::Utc;
use reqwest::Url;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::{ResolverConfig, DEFAULT_TIMEOUT_SECS};
use crate::domain::{
    synthesize, ArtifactCoordinate, DependencyDescriptor, ProblemMessage, RepositoryChain,
    RepositoryEndpoint, ResolutionFailure, ResolutionReport, ResolvedArtifact,
};
use crate::error::{AppError, AppResult, FetchError};
use crate::events::{
    ArtifactResolved, EndpointAttemptFailed, EventBus, ResolutionCancelled, ResolutionFailed,
    ResolutionRequested,
};
use crate::infrastructure::ArtifactWorkspace;
use crate::integrations::ArtifactFetcher;

// ============================================================================
// OPTIONS
// ============================================================================

/// Per-service resolution settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Upper bound for a single endpoint attempt
    pub timeout: Duration,

    /// Root under which request workspaces are created
    pub cache_root: PathBuf,
}

impl ResolveOptions {
    pub fn new(cache_root: PathBuf) -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_root,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &ResolverConfig) -> AppResult<Self> {
        Ok(Self::new(config.cache_root()?).with_timeout(config.timeout()))
    }
}

// ============================================================================
// RESOLUTION SERVICE
// ============================================================================

pub struct ResolutionService {
    fetcher: Arc<dyn ArtifactFetcher>,
    event_bus: Arc<EventBus>,
    options: ResolveOptions,
}

/// Outcome of one endpoint attempt
enum Attempt {
    Fetched(Vec<u8>),
    Failed(FetchError),
    Cancelled,
}

impl ResolutionService {
    pub fn new(
        fetcher: Arc<dyn ArtifactFetcher>,
        event_bus: Arc<EventBus>,
        options: ResolveOptions,
    ) -> Self {
        Self {
            fetcher,
            event_bus,
            options,
        }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Synthesize a descriptor for `coordinate` and resolve it
    pub async fn resolve_coordinate(
        &self,
        chain: &RepositoryChain,
        coordinate: &ArtifactCoordinate,
        cancel: &CancellationToken,
    ) -> AppResult<ResolutionReport> {
        let descriptor = synthesize(coordinate)?;
        self.resolve(chain, &descriptor, cancel).await
    }

    /// Resolve the descriptor's single dependency against the chain.
    ///
    /// Returns `Ok(Resolved)` with the first artifact found, `Ok(Failed)`
    /// with one problem per endpoint when every endpoint failed, or
    /// `Err(Cancelled)` when `cancel` fired first.
    pub async fn resolve(
        &self,
        chain: &RepositoryChain,
        descriptor: &DependencyDescriptor,
        cancel: &CancellationToken,
    ) -> AppResult<ResolutionReport> {
        chain.ensure_not_empty()?;
        descriptor.validate()?;

        let request_id = Uuid::new_v4();
        let dependency = descriptor.dependency();
        let coordinate = dependency.to_string();

        if cancel.is_cancelled() {
            self.event_bus
                .emit(ResolutionCancelled::new(request_id, coordinate, 0));
            return Err(AppError::Cancelled);
        }

        log::info!(
            "[{}] resolving {} against {} endpoint(s): {}",
            request_id,
            coordinate,
            chain.len(),
            chain.names().join(", ")
        );
        self.event_bus.emit(ResolutionRequested::new(
            request_id,
            coordinate.clone(),
            chain.len(),
        ));

        let mut problems = Vec::with_capacity(chain.len());

        for (index, endpoint) in chain.iter().enumerate() {
            let url = match endpoint.artifact_url(dependency) {
                Ok(url) => url,
                Err(e) => {
                    let problem =
                        ProblemMessage::new(endpoint.name(), "", format!("invalid-url: {}", e));
                    self.record_problem(request_id, &mut problems, problem);
                    continue;
                }
            };

            log::debug!("[{}] trying {} at {}", request_id, endpoint.name(), url);

            match self.attempt(&url, cancel).await {
                Attempt::Fetched(content) => {
                    let artifact =
                        self.store_resolved(request_id, descriptor, endpoint, &url, &content)?;
                    return Ok(ResolutionReport::Resolved(artifact));
                }
                Attempt::Failed(error) => {
                    let problem = ProblemMessage::new(endpoint.name(), url.as_str(), error.to_string());
                    self.record_problem(request_id, &mut problems, problem);
                }
                Attempt::Cancelled => {
                    log::info!(
                        "[{}] cancelled during attempt {} of {}",
                        request_id,
                        index + 1,
                        chain.len()
                    );
                    self.event_bus
                        .emit(ResolutionCancelled::new(request_id, coordinate, index + 1));
                    return Err(AppError::Cancelled);
                }
            }
        }

        log::warn!(
            "[{}] {} could not be resolved from any endpoint",
            request_id,
            coordinate
        );
        self.event_bus.emit(ResolutionFailed::new(
            request_id,
            coordinate,
            problems.len(),
        ));

        Ok(ResolutionReport::Failed(ResolutionFailure::new(problems)?))
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    /// One bounded, cancellable fetch
    async fn attempt(&self, url: &Url, cancel: &CancellationToken) -> Attempt {
        let timeout = self.options.timeout;

        tokio::select! {
            biased;

            _ = cancel.cancelled() => Attempt::Cancelled,

            outcome = tokio::time::timeout(timeout, self.fetcher.fetch(url, timeout)) => {
                match outcome {
                    Err(_elapsed) => Attempt::Failed(FetchError::Timeout),
                    Ok(Err(error)) => Attempt::Failed(error),
                    Ok(Ok(content)) if content.is_empty() => {
                        Attempt::Failed(FetchError::MalformedResponse("empty body".to_string()))
                    }
                    Ok(Ok(content)) => Attempt::Fetched(content),
                }
            }
        }
    }

    fn record_problem(
        &self,
        request_id: Uuid,
        problems: &mut Vec<ProblemMessage>,
        problem: ProblemMessage,
    ) {
        log::warn!(
            "[{}] endpoint {} failed: {} ({})",
            request_id,
            problem.endpoint,
            problem.reason,
            problem.url
        );
        self.event_bus.emit(EndpointAttemptFailed::new(
            request_id,
            problem.endpoint.clone(),
            problem.url.clone(),
            problem.reason.clone(),
        ));
        problems.push(problem);
    }

    fn store_resolved(
        &self,
        request_id: Uuid,
        descriptor: &DependencyDescriptor,
        endpoint: &RepositoryEndpoint,
        url: &Url,
        content: &[u8],
    ) -> AppResult<ResolvedArtifact> {
        let dependency = descriptor.dependency();
        let workspace = ArtifactWorkspace::create(&self.options.cache_root, request_id)?;
        let stored = workspace.store(&dependency.file_name(), content)?;
        workspace.retain();

        log::info!(
            "[{}] resolved {} from {} -> {}",
            request_id,
            dependency,
            endpoint.name(),
            stored.path.display()
        );
        self.event_bus.emit(ArtifactResolved::new(
            request_id,
            dependency.to_string(),
            endpoint.name().to_string(),
            stored.path.clone(),
            stored.size_bytes,
        ));

        Ok(ResolvedArtifact {
            coordinate: dependency.clone(),
            source_endpoint: endpoint.name().to_string(),
            url: url.to_string(),
            local_path: stored.path,
            size_bytes: stored.size_bytes,
            sha256: stored.sha256,
            resolved_at: Utc::now(),
        })
    }
}
