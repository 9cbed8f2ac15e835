pub mod chain;
pub mod entity;
pub mod pattern;

pub use chain::{build_chain, RepositoryChain};
pub use entity::{accepts_repository, EndpointSpec, RepositoryEndpoint};
pub use pattern::{ArtifactPattern, PatternValues, DEFAULT_ARTIFACT_PATTERN};
