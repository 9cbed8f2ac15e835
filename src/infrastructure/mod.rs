// src/infrastructure/mod.rs
//
// Infrastructure Module
//
// Local storage for resolved artifacts.

pub mod artifact_workspace;

pub use artifact_workspace::{ArtifactWorkspace, StoredArtifact};
