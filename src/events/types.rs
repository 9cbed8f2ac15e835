// src/events/types.rs
//
// All resolution events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Trait that all events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ty, $name:literal) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { $name }
        }
    };
}

// ============================================================================
// REQUEST LIFECYCLE
// ============================================================================

/// Emitted when a chain walk starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionRequested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: Uuid,
    pub coordinate: String,
    pub endpoint_count: usize,
}

impl ResolutionRequested {
    pub fn new(request_id: Uuid, coordinate: String, endpoint_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            coordinate,
            endpoint_count,
        }
    }
}

impl_domain_event!(ResolutionRequested, "ResolutionRequested");

/// Emitted for every endpoint that could not serve the artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointAttemptFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: Uuid,
    pub endpoint: String,
    pub url: String,
    pub reason: String,
}

impl EndpointAttemptFailed {
    pub fn new(request_id: Uuid, endpoint: String, url: String, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            endpoint,
            url,
            reason,
        }
    }
}

impl_domain_event!(EndpointAttemptFailed, "EndpointAttemptFailed");

/// Emitted when an endpoint served the artifact and it was stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: Uuid,
    pub coordinate: String,
    pub source_endpoint: String,
    pub local_path: PathBuf,
    pub size_bytes: u64,
}

impl ArtifactResolved {
    pub fn new(
        request_id: Uuid,
        coordinate: String,
        source_endpoint: String,
        local_path: PathBuf,
        size_bytes: u64,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            coordinate,
            source_endpoint,
            local_path,
            size_bytes,
        }
    }
}

impl_domain_event!(ArtifactResolved, "ArtifactResolved");

/// Emitted when every endpoint in the chain failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: Uuid,
    pub coordinate: String,
    pub problem_count: usize,
}

impl ResolutionFailed {
    pub fn new(request_id: Uuid, coordinate: String, problem_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            coordinate,
            problem_count,
        }
    }
}

impl_domain_event!(ResolutionFailed, "ResolutionFailed");

/// Emitted when the caller abandoned the request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionCancelled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: Uuid,
    pub coordinate: String,
    pub attempted_endpoints: usize,
}

impl ResolutionCancelled {
    pub fn new(request_id: Uuid, coordinate: String, attempted_endpoints: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            coordinate,
            attempted_endpoints,
        }
    }
}

impl_domain_event!(ResolutionCancelled, "ResolutionCancelled");
