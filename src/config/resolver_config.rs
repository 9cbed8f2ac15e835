// src/config/resolver_config.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{build_chain, EndpointSpec, RepositoryChain};
use crate::error::{AppError, AppResult};

/// Per-endpoint fetch timeout when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything the resolver needs to know before the first request
///
/// ```toml
/// timeout_secs = 30
/// cache_dir = "/var/cache/artifacthub"
///
/// [[endpoints]]
/// name = "jitpack"
/// base_url = "https://jitpack.io"
/// maven_compatible = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Ordered endpoint chain; order is fallback precedence
    #[serde(default)]
    pub endpoints: Vec<EndpointSpec>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where resolved artifacts are stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ResolverConfig {
    /// JitPack first, then Maven Central
    fn default() -> Self {
        Self {
            endpoints: vec![
                EndpointSpec::new("jitpack", "https://jitpack.io", true),
                EndpointSpec::new("central", "https://repo1.maven.org/maven2", true),
            ],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_dir: None,
        }
    }
}

impl ResolverConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: ResolverConfig = toml::from_str(content)?;
        if config.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("cannot read config {}: {}", path.display(), e))
        })?;
        log::debug!("loaded resolver config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Append an ad-hoc repository (named after its host) to the chain
    pub fn add_repository(&mut self, url: &str) -> AppResult<()> {
        let spec = EndpointSpec::from_repository_url(url)?;
        self.endpoints.push(spec);
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the endpoints into a chain
    pub fn build_chain(&self) -> AppResult<RepositoryChain> {
        Ok(build_chain(&self.endpoints)?)
    }

    /// Configured cache root, or the default one
    pub fn cache_root(&self) -> AppResult<PathBuf> {
        match &self.cache_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                Ok(dir.clone())
            }
            None => default_cache_dir(),
        }
    }
}

/// Default cache root
///
/// Path structure: {USER_CACHE}/artifacthub/artifacts
pub fn default_cache_dir() -> AppResult<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| AppError::Other("Could not determine user cache directory".to_string()))?;

    let artifacts_dir = cache_dir.join("artifacthub").join("artifacts");
    std::fs::create_dir_all(&artifacts_dir)?;

    Ok(artifacts_dir)
}
