// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod coordinate;
pub mod descriptor;
pub mod repository;
pub mod resolution;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Coordinate
pub use coordinate::{accepts_artifact, validate_coordinate, ArtifactCoordinate};

// Repository chain
pub use repository::{
    accepts_repository, build_chain, ArtifactPattern, EndpointSpec, PatternValues,
    RepositoryChain, RepositoryEndpoint,
};

// Descriptor
pub use descriptor::{
    synthesize, ConfigurationMapping, DependencyDescriptor, DependencyFlags, ModuleRevision,
};

// Resolution outcome
pub use resolution::{ProblemMessage, ResolutionFailure, ResolutionReport, ResolvedArtifact};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of the resolver's invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid endpoint '{name}': {reason}")]
    InvalidEndpoint { name: String, reason: String },

    #[error("Duplicate endpoint name: {0}")]
    DuplicateEndpoint(String),

    #[error("Repository chain must contain at least one endpoint")]
    EmptyChain,

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
