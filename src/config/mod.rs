// src/config/mod.rs
//
// Resolver configuration
//
// Provides:
// - ResolverConfig: the endpoint chain, fetch timeout and cache location
// - TOML loading
// - Default cache root under the user cache directory

pub mod resolver_config;

pub use resolver_config::{default_cache_dir, ResolverConfig, DEFAULT_TIMEOUT_SECS};
