// src/integrations/fetcher.rs
//
// Fetch capability
//
// The resolver only ever needs "give me the bytes at this URL within this
// timeout". Everything else (HTTP client, TLS, redirects) lives behind it.

use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

use crate::error::FetchError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    /// Fetch the full content at `url`, giving up after `timeout`
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}
