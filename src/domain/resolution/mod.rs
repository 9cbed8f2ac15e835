// src/domain/resolution/mod.rs
//
// Resolution Domain
//
// Value objects representing the outcome of one resolution attempt.
//
// CRITICAL RULES:
// - All types are pure value objects (immutable)
// - A report is either resolved or failed, never both, never neither
// - No I/O

pub mod value_objects;

pub use value_objects::{ProblemMessage, ResolutionFailure, ResolutionReport, ResolvedArtifact};
