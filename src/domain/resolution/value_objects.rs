// src/domain/resolution/value_objects.rs
//
// Resolution Value Objects
//
// Pure, immutable data structures representing resolution outcomes.
// Clone + Debug + Serialize for traceability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::coordinate::ArtifactCoordinate;
use crate::domain::{DomainError, DomainResult};

// ============================================================================
// RESOLUTION REPORT (TOP-LEVEL OUTCOME)
// ============================================================================

/// The outcome of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionReport {
    /// The first endpoint that served the artifact
    Resolved(ResolvedArtifact),

    /// Every endpoint failed
    Failed(ResolutionFailure),
}

impl ResolutionReport {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionReport::Resolved(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ResolutionReport::Failed(_))
    }

    /// Resolved artifacts, in order. Empty on failure.
    pub fn artifacts(&self) -> &[ResolvedArtifact] {
        match self {
            ResolutionReport::Resolved(artifact) => std::slice::from_ref(artifact),
            ResolutionReport::Failed(_) => &[],
        }
    }

    /// Problems encountered, in chain order. Empty on success.
    pub fn problems(&self) -> &[ProblemMessage] {
        match self {
            ResolutionReport::Resolved(_) => &[],
            ResolutionReport::Failed(failure) => failure.problems(),
        }
    }

    /// Local file of the first resolved artifact
    pub fn local_path(&self) -> Option<&Path> {
        self.artifacts().first().map(|a| a.local_path.as_path())
    }
}

// ============================================================================
// RESOLVED ARTIFACT
// ============================================================================

/// An artifact downloaded from one endpoint and stored locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedArtifact {
    pub coordinate: ArtifactCoordinate,

    /// Name of the endpoint that served the artifact
    pub source_endpoint: String,

    /// URL the artifact was fetched from
    pub url: String,

    /// Request-unique local file
    pub local_path: PathBuf,

    pub size_bytes: u64,

    /// Hex SHA-256 of the stored content
    pub sha256: String,

    pub resolved_at: DateTime<Utc>,
}

// ============================================================================
// FAILURE
// ============================================================================

/// One failed endpoint attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemMessage {
    pub endpoint: String,
    pub url: String,
    pub reason: String,
}

impl ProblemMessage {
    pub fn new(endpoint: impl Into<String>, url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ProblemMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.endpoint, self.reason, self.url)
    }
}

/// Aggregated failure across the whole chain. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    problems: Vec<ProblemMessage>,
}

impl ResolutionFailure {
    pub fn new(problems: Vec<ProblemMessage>) -> DomainResult<Self> {
        if problems.is_empty() {
            return Err(DomainError::InvariantViolation(
                "a failed resolution must carry at least one problem".to_string(),
            ));
        }
        Ok(Self { problems })
    }

    pub fn problems(&self) -> &[ProblemMessage] {
        &self.problems
    }
}

impl std::fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self.problems.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", lines.join("; "))
    }
}

// ============================================================================
// TESTS
// ============================================================================
