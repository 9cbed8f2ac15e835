// src/application/commands/resolve_commands.rs

use tokio_util::sync::CancellationToken;

use crate::application::state::AppState;
use crate::domain::{ArtifactCoordinate, ResolutionReport};
use crate::error::AppResult;

/// Resolve a coordinate given in string form
/// (`group:name:version[:configuration][@extension]`)
pub async fn resolve_artifact(
    coordinate: &str,
    state: &AppState,
    cancel: &CancellationToken,
) -> AppResult<ResolutionReport> {
    let coordinate = ArtifactCoordinate::parse(coordinate)?;

    state
        .resolution_service
        .resolve_coordinate(&state.chain, &coordinate, cancel)
        .await
}

/// Endpoint names of the configured chain, in fallback order
pub fn list_repositories(state: &AppState) -> Vec<String> {
    state.chain.names().into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::ResolverConfig;
    use crate::domain::EndpointSpec;
    use crate::error::AppError;
    use crate::integrations::HttpArtifactFetcher;

    fn local_mirror_config(mirror: &std::path::Path, cache: &std::path::Path) -> ResolverConfig {
        let mirror_url = reqwest::Url::from_directory_path(mirror).unwrap();
        ResolverConfig {
            endpoints: vec![
                EndpointSpec::new("empty", "file:///nonexistent-artifacthub-mirror", true),
                EndpointSpec::new("mirror", mirror_url.as_str(), true),
            ],
            timeout_secs: 5,
            cache_dir: Some(cache.to_path_buf()),
        }
    }

    #[tokio::test]
    async fn test_resolve_from_local_mirror() {
        let mirror = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();

        let artifact_dir = mirror.path().join("org/example/lib/1.0");
        std::fs::create_dir_all(&artifact_dir).unwrap();
        std::fs::write(artifact_dir.join("lib-1.0.jar"), b"jar bytes").unwrap();

        let config = local_mirror_config(mirror.path(), cache.path());
        let state = AppState::with_fetcher(
            &config,
            Arc::new(HttpArtifactFetcher::new().unwrap()),
        )
        .unwrap();

        assert_eq!(list_repositories(&state), vec!["empty", "mirror"]);

        let report = resolve_artifact("org.example:lib:1.0", &state, &CancellationToken::new())
            .await
            .unwrap();

        assert!(report.is_resolved());
        assert_eq!(report.artifacts()[0].source_endpoint, "mirror");
        assert_eq!(
            std::fs::read(report.local_path().unwrap()).unwrap(),
            b"jar bytes"
        );
    }

    #[tokio::test]
    async fn test_resolve_rejects_malformed_string() {
        let cache = tempfile::tempdir().unwrap();
        let config = ResolverConfig {
            cache_dir: Some(cache.path().to_path_buf()),
            ..ResolverConfig::default()
        };
        let state = AppState::from_config(&config).unwrap();

        let result = resolve_artifact("not-a-coordinate", &state, &CancellationToken::new()).await;
        assert!(matches!(result, Err(AppError::InvalidCoordinate(_))));
    }
}
