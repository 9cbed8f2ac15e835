use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::pattern::{ArtifactPattern, PatternValues};
use crate::domain::coordinate::ArtifactCoordinate;
use crate::domain::{DomainError, DomainResult};

/// Configuration-level description of one repository endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
    /// Unique name within the chain, used in diagnostics
    pub name: String,

    /// Root URL of the repository
    pub base_url: String,

    /// Map dotted groups onto path segments
    #[serde(default = "default_maven_compatible")]
    pub maven_compatible: bool,

    /// Artifact pattern relative to `base_url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

fn default_maven_compatible() -> bool {
    true
}

impl EndpointSpec {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, maven_compatible: bool) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            maven_compatible,
            pattern: None,
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Describe an ad-hoc repository given only its URL.
    ///
    /// The endpoint is named after the URL host and uses the Maven layout.
    pub fn from_repository_url(url: &str) -> DomainResult<Self> {
        let parsed = parse_base_url(url, url)?;
        let host = parsed.host_str().ok_or_else(|| DomainError::InvalidEndpoint {
            name: url.to_string(),
            reason: "repository URL has no host".to_string(),
        })?;

        Ok(Self::new(host, url, true))
    }
}

/// True when the string is a usable repository URL
pub fn accepts_repository(url: &str) -> bool {
    parse_base_url(url, url).is_ok()
}

fn parse_base_url(name: &str, raw: &str) -> DomainResult<Url> {
    let invalid = |reason: String| DomainError::InvalidEndpoint {
        name: name.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(format!("malformed base URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => {
            if url.host_str().map_or(true, str::is_empty) {
                return Err(invalid(format!("base URL '{}' has no host", raw)));
            }
        }
        "file" => {}
        other => return Err(invalid(format!("unsupported URL scheme '{}'", other))),
    }

    if url.cannot_be_a_base() {
        return Err(invalid(format!("base URL '{}' cannot carry a path", raw)));
    }

    // Artifact paths are appended to the base path; a query or fragment would swallow them
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(format!(
            "base URL '{}' must not have a query or fragment",
            raw
        )));
    }

    Ok(url)
}

/// One candidate source of artifacts. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEndpoint {
    name: String,
    base_url: Url,
    artifact_pattern: ArtifactPattern,
    maven_compatible: bool,
}

impl RepositoryEndpoint {
    /// Validate a spec into an endpoint
    pub fn from_spec(spec: &EndpointSpec) -> DomainResult<Self> {
        let name = spec.name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidEndpoint {
                name: spec.base_url.clone(),
                reason: "endpoint name cannot be empty".to_string(),
            });
        }

        let base_url = parse_base_url(name, &spec.base_url)?;

        let artifact_pattern = match &spec.pattern {
            Some(template) => ArtifactPattern::parse(template).map_err(|e| DomainError::InvalidEndpoint {
                name: name.to_string(),
                reason: e.to_string(),
            })?,
            None => ArtifactPattern::default(),
        };

        Ok(Self {
            name: name.to_string(),
            base_url,
            artifact_pattern,
            maven_compatible: spec.maven_compatible,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn artifact_pattern(&self) -> &ArtifactPattern {
        &self.artifact_pattern
    }

    pub fn is_maven_compatible(&self) -> bool {
        self.maven_compatible
    }

    /// Concrete URL of the dependency's artifact on this endpoint
    pub fn artifact_url(&self, dependency: &ArtifactCoordinate) -> DomainResult<Url> {
        let values = PatternValues::for_dependency(dependency, self.maven_compatible);
        let path = self.artifact_pattern.expand(&values);

        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = format!("{}/{}", base, path.trim_start_matches('/'));

        Url::parse(&joined).map_err(|e| {
            DomainError::InvariantViolation(format!(
                "endpoint '{}' produced an invalid URL '{}': {}",
                self.name, joined, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_url_jitpack() {
        let endpoint =
            RepositoryEndpoint::from_spec(&EndpointSpec::new("jitpack", "https://jitpack.io", true)).unwrap();
        let coord = ArtifactCoordinate::new("com.github.tmtsoftware.esw", "esw-ocs-dsl-kt_2.13", "abc123");

        assert_eq!(
            endpoint.artifact_url(&coord).unwrap().as_str(),
            "https://jitpack.io/com/github/tmtsoftware/esw/esw-ocs-dsl-kt_2.13/abc123/esw-ocs-dsl-kt_2.13-abc123.jar"
        );
    }

    #[test]
    fn test_artifact_url_keeps_base_path() {
        let endpoint = RepositoryEndpoint::from_spec(&EndpointSpec::new(
            "central",
            "https://repo1.maven.org/maven2/",
            true,
        ))
        .unwrap();
        let coord = ArtifactCoordinate::new("org.slf4j", "slf4j-api", "2.0.9");

        assert_eq!(
            endpoint.artifact_url(&coord).unwrap().as_str(),
            "https://repo1.maven.org/maven2/org/slf4j/slf4j-api/2.0.9/slf4j-api-2.0.9.jar"
        );
    }

    #[test]
    fn test_custom_pattern() {
        let spec = EndpointSpec::new("flat", "https://mirror.example.com/ivy", false)
            .with_pattern("[organisation]/[module]/[revision]/[type]s/[artifact].[ext]");
        let endpoint = RepositoryEndpoint::from_spec(&spec).unwrap();
        let coord = ArtifactCoordinate::new("org.example", "lib", "1.0");

        assert_eq!(
            endpoint.artifact_url(&coord).unwrap().as_str(),
            "https://mirror.example.com/ivy/org.example/lib/1.0/jars/lib.jar"
        );
    }

    #[test]
    fn test_malformed_base_url_names_entry() {
        let result = RepositoryEndpoint::from_spec(&EndpointSpec::new("broken", "not a url", true));
        match result {
            Err(DomainError::InvalidEndpoint { name, .. }) => assert_eq!(name, "broken"),
            other => panic!("Expected InvalidEndpoint, got {:?}", other),
        }
    }

    #[test]
    fn test_base_url_with_query_or_fragment_is_rejected() {
        for raw in [
            "https://a.example.com/repo?token=abc",
            "https://a.example.com/repo#releases",
            "https://a.example.com/repo?",
        ] {
            let result = RepositoryEndpoint::from_spec(&EndpointSpec::new("tokenized", raw, true));
            match result {
                Err(DomainError::InvalidEndpoint { name, reason }) => {
                    assert_eq!(name, "tokenized");
                    assert!(reason.contains("query or fragment"), "reason: {}", reason);
                }
                other => panic!("Expected InvalidEndpoint for {}, got {:?}", raw, other),
            }
            assert!(!accepts_repository(raw));
        }
    }

    #[test]
    fn test_unsupported_scheme() {
        let result = RepositoryEndpoint::from_spec(&EndpointSpec::new("mail", "mailto:ops@example.com", true));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_repository_url_uses_host() {
        let spec = EndpointSpec::from_repository_url("https://maven.example.org/releases/").unwrap();
        assert_eq!(spec.name, "maven.example.org");
        assert!(spec.maven_compatible);
        assert!(spec.pattern.is_none());

        assert!(accepts_repository("https://jitpack.io"));
        assert!(!accepts_repository("jitpack"));
    }
}
