pub mod entity;
pub mod invariants;

pub use entity::{accepts_artifact, ArtifactCoordinate, DEFAULT_EXTENSION};
pub use invariants::validate_coordinate;
