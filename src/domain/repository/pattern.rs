// src/domain/repository/pattern.rs
//
// Artifact URL pattern templates.
//
// Syntax:
// - `[token]` is replaced by the matching value
// - `( ... )` is an optional group, kept only when every token inside it
//   has a non-empty value
//
// Known tokens: organisation/organization, module, artifact, revision,
// ext, type, conf.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::domain::coordinate::ArtifactCoordinate;
use crate::domain::{DomainError, DomainResult};

/// Maven-style layout used when an endpoint does not provide its own pattern
pub const DEFAULT_ARTIFACT_PATTERN: &str =
    "[organisation]/[module]/[revision]/[artifact](-[revision]).[ext]";

const KNOWN_TOKENS: &[&str] = &[
    "organisation",
    "organization",
    "module",
    "artifact",
    "revision",
    "ext",
    "type",
    "conf",
];

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([A-Za-z]+)\]").unwrap());

static OPTIONAL_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^()]*)\)").unwrap());

/// A validated artifact pattern template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPattern {
    template: String,
}

impl ArtifactPattern {
    /// Parse and validate a template
    pub fn parse(template: &str) -> DomainResult<Self> {
        let template = template.trim();
        if template.is_empty() {
            return Err(DomainError::InvariantViolation(
                "artifact pattern cannot be empty".to_string(),
            ));
        }

        validate_groups(template)?;

        for caps in TOKEN.captures_iter(template) {
            let token = &caps[1];
            if !KNOWN_TOKENS.contains(&token) {
                return Err(DomainError::InvariantViolation(format!(
                    "unknown pattern token [{}] in '{}'",
                    token, template
                )));
            }
        }

        Ok(Self {
            template: template.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute values into the template
    pub fn expand(&self, values: &PatternValues) -> String {
        let resolved_groups = OPTIONAL_GROUP.replace_all(&self.template, |caps: &Captures| {
            let inner = &caps[1];
            let complete = TOKEN
                .captures_iter(inner)
                .all(|token| values.get(&token[1]).is_some_and(|v| !v.is_empty()));
            if complete {
                inner.to_string()
            } else {
                String::new()
            }
        });

        TOKEN
            .replace_all(&resolved_groups, |caps: &Captures| {
                values.get(&caps[1]).unwrap_or_default().to_string()
            })
            .into_owned()
    }
}

impl Default for ArtifactPattern {
    fn default() -> Self {
        Self {
            template: DEFAULT_ARTIFACT_PATTERN.to_string(),
        }
    }
}

/// Parentheses must balance and must not nest
fn validate_groups(template: &str) -> DomainResult<()> {
    let mut open = false;
    for c in template.chars() {
        match c {
            '(' if open => {
                return Err(DomainError::InvariantViolation(format!(
                    "nested optional group in pattern '{}'",
                    template
                )))
            }
            '(' => open = true,
            ')' if !open => {
                return Err(DomainError::InvariantViolation(format!(
                    "unbalanced ')' in pattern '{}'",
                    template
                )))
            }
            ')' => open = false,
            _ => {}
        }
    }

    if open {
        return Err(DomainError::InvariantViolation(format!(
            "unclosed optional group in pattern '{}'",
            template
        )));
    }
    Ok(())
}

/// Token values for one dependency against one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternValues {
    pub organisation: String,
    pub module: String,
    pub revision: String,
    pub ext: String,
    pub conf: Option<String>,
}

impl PatternValues {
    /// Values for a coordinate. A Maven-compatible endpoint maps the dotted
    /// group onto path segments.
    pub fn for_dependency(coordinate: &ArtifactCoordinate, maven_compatible: bool) -> Self {
        let organisation = if maven_compatible {
            coordinate.group.replace('.', "/")
        } else {
            coordinate.group.clone()
        };

        Self {
            organisation,
            module: coordinate.name.clone(),
            revision: coordinate.version.clone(),
            ext: coordinate.extension().to_string(),
            conf: coordinate.configuration.clone(),
        }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        match token {
            "organisation" | "organization" => Some(&self.organisation),
            "module" | "artifact" => Some(&self.module),
            "revision" => Some(&self.revision),
            "ext" | "type" => Some(&self.ext),
            "conf" => self.conf.as_deref(),
            _ => None,
        }
    }
}
