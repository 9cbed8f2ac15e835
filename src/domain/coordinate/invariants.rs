use super::entity::ArtifactCoordinate;
use crate::domain::{DomainError, DomainResult};

/// Validates all ArtifactCoordinate invariants
pub fn validate_coordinate(coordinate: &ArtifactCoordinate) -> DomainResult<()> {
    validate_segment("group", &coordinate.group)?;
    validate_segment("name", &coordinate.name)?;
    validate_segment("version", &coordinate.version)?;

    if let Some(configuration) = &coordinate.configuration {
        validate_segment("configuration", configuration)?;
    }
    if let Some(extension) = &coordinate.extension {
        validate_segment("extension", extension)?;
        if extension.contains('.') {
            return Err(DomainError::InvalidCoordinate(format!(
                "extension must not contain '.': '{}'",
                extension
            )));
        }
    }

    Ok(())
}

/// Segment must be non-empty and safe to substitute into a URL path template
fn validate_segment(field: &str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::InvalidCoordinate(format!("{} cannot be empty", field)));
    }

    if let Some(c) = value.chars().find(|c| is_unsafe_char(*c)) {
        return Err(DomainError::InvalidCoordinate(format!(
            "{} contains unsafe character {:?}: '{}'",
            field, c, value
        )));
    }

    // Dots delimit the group namespace; a double dot would climb out of it
    if value.contains("..") || value.starts_with('.') || value.ends_with('.') {
        return Err(DomainError::InvalidCoordinate(format!(
            "{} has an empty dot-delimited segment: '{}'",
            field, value
        )));
    }

    Ok(())
}

fn is_unsafe_char(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '@' | '[' | ']' | '(' | ')' | '?' | '#' | '%')
        || c.is_whitespace()
        || c.is_control()
}
