use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::invariants::validate_coordinate;
use crate::domain::{DomainError, DomainResult};

/// Extension used when a coordinate does not name one
pub const DEFAULT_EXTENSION: &str = "jar";

/// Identifies a requested artifact.
///
/// `version` is opaque: a semantic version or any revision token such as a
/// commit hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    /// Dot-delimited namespace
    pub group: String,

    /// Module name
    pub name: String,

    /// Revision token
    pub version: String,

    /// Optional configuration requested from the module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,

    /// Optional artifact extension (`jar` when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl ArtifactCoordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            configuration: None,
            extension: None,
        }
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// The artifact extension, falling back to `jar`
    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    /// File name of the artifact as published in a Maven layout
    pub fn file_name(&self) -> String {
        format!("{}-{}.{}", self.name, self.version, self.extension())
    }

    /// Parse `group:name:version[:configuration][@extension]`.
    ///
    /// The result is validated, so a parsed coordinate is always safe for
    /// path-template substitution.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let input = input.trim();
        let (coordinates, extension) = split_extension(input);

        if !accepts_artifact(coordinates) {
            return Err(DomainError::InvalidCoordinate(format!(
                "expected group:name:version[:configuration][@extension], got '{}'",
                input
            )));
        }

        let parts: Vec<&str> = coordinates.split(':').map(str::trim).collect();
        let mut coordinate = ArtifactCoordinate::new(parts[0], parts[1], parts[2]);
        if let Some(configuration) = parts.get(3) {
            coordinate = coordinate.with_configuration(*configuration);
        }
        if let Some(extension) = extension {
            coordinate = coordinate.with_extension(extension);
        }

        validate_coordinate(&coordinate)?;
        Ok(coordinate)
    }
}

/// Split a trailing `@extension` off the coordinate string
fn split_extension(input: &str) -> (&str, Option<&str>) {
    match input.rsplit_once('@') {
        Some((coordinates, extension)) if extension.trim().is_empty() => (coordinates, None),
        Some((coordinates, extension)) => (coordinates, Some(extension.trim())),
        None => (input, None),
    }
}

/// True when the string has the shape of an artifact coordinate:
/// non-blank with two or three `:` separators.
pub fn accepts_artifact(input: &str) -> bool {
    if input.trim().is_empty() {
        return false;
    }
    let separators = input.chars().filter(|c| *c == ':').count();
    separators == 2 || separators == 3
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)?;
        if let Some(configuration) = &self.configuration {
            write!(f, ":{}", configuration)?;
        }
        if let Some(extension) = &self.extension {
            write!(f, "@{}", extension)?;
        }
        Ok(())
    }
}

impl FromStr for ArtifactCoordinate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_part_coordinate() {
        let coord = ArtifactCoordinate::parse("com.github.tmtsoftware.esw:esw-ocs-dsl-kt_2.13:abc123")
            .unwrap();
        assert_eq!(coord.group, "com.github.tmtsoftware.esw");
        assert_eq!(coord.name, "esw-ocs-dsl-kt_2.13");
        assert_eq!(coord.version, "abc123");
        assert!(coord.configuration.is_none());
        assert_eq!(coord.extension(), "jar");
    }

    #[test]
    fn test_parse_configuration_and_extension() {
        let coord = ArtifactCoordinate::parse("org.example:lib:1.0:runtime@aar").unwrap();
        assert_eq!(coord.configuration.as_deref(), Some("runtime"));
        assert_eq!(coord.extension(), "aar");
        assert_eq!(coord.file_name(), "lib-1.0.aar");
        assert_eq!(coord.to_string(), "org.example:lib:1.0:runtime@aar");
    }

    #[test]
    fn test_blank_extension_suffix_is_ignored() {
        let coord = ArtifactCoordinate::parse("org.example:lib:1.0@").unwrap();
        assert!(coord.extension.is_none());
    }

    #[test]
    fn test_accepts_artifact() {
        assert!(accepts_artifact("g:n:v"));
        assert!(accepts_artifact("g:n:v:conf"));
        assert!(!accepts_artifact("g:n"));
        assert!(!accepts_artifact("g:n:v:c:x"));
        assert!(!accepts_artifact("   "));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let result = ArtifactCoordinate::parse("just-a-name");
        assert!(matches!(result, Err(DomainError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_parse_rejects_empty_segment() {
        let result = "org.example::1.0".parse::<ArtifactCoordinate>();
        assert!(matches!(result, Err(DomainError::InvalidCoordinate(_))));
    }
}
