// src/lib.rs
// ArtifactHub - Fallback-chain artifact resolver
//
// Architecture:
// - Domain-centric: coordinates, chains, descriptors and reports are pure values
// - Event-driven: resolution lifecycle is published on the event bus
// - Explicit: fetch capability is injected, never global
// - Request-scoped: every resolution gets its own workspace

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    accepts_artifact,
    accepts_repository,
    build_chain,
    synthesize,
    validate_coordinate,
    // Coordinate
    ArtifactCoordinate,
    // Repository chain
    ArtifactPattern,
    ConfigurationMapping,
    // Descriptor
    DependencyDescriptor,
    DependencyFlags,
    DomainError,
    EndpointSpec,
    ModuleRevision,
    // Resolution
    ProblemMessage,
    RepositoryChain,
    RepositoryEndpoint,
    ResolutionFailure,
    ResolutionReport,
    ResolvedArtifact,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, FetchError};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    ArtifactResolved, DomainEvent, EndpointAttemptFailed, EventBus, EventLogEntry,
    ResolutionCancelled, ResolutionFailed, ResolutionRequested, DEFAULT_EVENT_LOG_CAPACITY,
};

// ============================================================================
// PUBLIC API - Configuration & Infrastructure
// ============================================================================

pub use config::{default_cache_dir, ResolverConfig, DEFAULT_TIMEOUT_SECS};
pub use infrastructure::{ArtifactWorkspace, StoredArtifact};

// ============================================================================
// PUBLIC API - Services & Integrations
// ============================================================================

pub use integrations::{ArtifactFetcher, HttpArtifactFetcher};
pub use services::{ResolutionService, ResolveOptions};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};
