// src/integrations/mod.rs
//
// External Integrations Module
//
// - fetcher: the narrow fetch capability the resolver depends on
// - http: the production implementation (HTTP via reqwest, plus file://)

pub mod fetcher;
pub mod http;

pub use fetcher::ArtifactFetcher;
pub use http::client::HttpArtifactFetcher;

#[cfg(test)]
pub use fetcher::MockArtifactFetcher;
