use serde::{Deserialize, Serialize};

use crate::domain::coordinate::{validate_coordinate, ArtifactCoordinate};
use crate::domain::{DomainError, DomainResult};

/// Revision of the synthetic caller module
pub const CALLER_REVISION: &str = "working";

/// Suffix appended to the dependency name to form the caller module name
pub const CALLER_SUFFIX: &str = "-caller";

const DEFAULT_CONFIGURATION: &str = "default";
const DEFAULT_TARGET_CONFIGURATIONS: [&str; 2] = ["master", "compile"];

/// Identity of a module at a revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRevision {
    pub organisation: String,
    pub module: String,
    pub revision: String,
}

/// Resolution flags of the dependency edge. Fixed policy:
/// non-transitive, not forced, content at a revision may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyFlags {
    pub force: bool,
    pub changing: bool,
    pub transitive: bool,
}

impl Default for DependencyFlags {
    fn default() -> Self {
        Self {
            force: false,
            changing: true,
            transitive: false,
        }
    }
}

/// Maps the caller's configuration onto the dependency's configurations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationMapping {
    pub from: String,
    pub to: Vec<String>,
}

impl ConfigurationMapping {
    fn for_dependency(dependency: &ArtifactCoordinate) -> Self {
        let to = match &dependency.configuration {
            Some(configuration) => vec![configuration.clone()],
            None => DEFAULT_TARGET_CONFIGURATIONS.iter().map(|c| c.to_string()).collect(),
        };

        Self {
            from: DEFAULT_CONFIGURATION.to_string(),
            to,
        }
    }
}

impl std::fmt::Display for ConfigurationMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.from, self.to.join(","))
    }
}

/// A synthetic caller module declaring one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDescriptor {
    caller: ModuleRevision,
    dependency: ArtifactCoordinate,
    flags: DependencyFlags,
    configuration: ConfigurationMapping,
}

impl DependencyDescriptor {
    pub fn caller(&self) -> &ModuleRevision {
        &self.caller
    }

    /// The single dependency edge
    pub fn dependency(&self) -> &ArtifactCoordinate {
        &self.dependency
    }

    pub fn flags(&self) -> DependencyFlags {
        self.flags
    }

    pub fn configuration(&self) -> &ConfigurationMapping {
        &self.configuration
    }

    /// Re-check the descriptor's invariants at a boundary
    pub fn validate(&self) -> DomainResult<()> {
        validate_coordinate(&self.dependency)?;

        let expected_caller = format!("{}{}", self.dependency.name, CALLER_SUFFIX);
        if self.caller.module != expected_caller || self.caller.organisation != self.dependency.group {
            return Err(DomainError::InvalidCoordinate(format!(
                "caller module {}:{} does not match dependency {}",
                self.caller.organisation, self.caller.module, self.dependency
            )));
        }

        if self.flags != DependencyFlags::default() {
            return Err(DomainError::InvalidCoordinate(format!(
                "dependency {} must be non-transitive, changing and not forced",
                self.dependency
            )));
        }

        Ok(())
    }
}

/// Build the throwaway descriptor for a requested coordinate.
///
/// Deterministic: equal coordinates yield equal descriptors.
pub fn synthesize(coordinate: &ArtifactCoordinate) -> DomainResult<DependencyDescriptor> {
    validate_coordinate(coordinate)?;

    Ok(DependencyDescriptor {
        caller: ModuleRevision {
            organisation: coordinate.group.clone(),
            module: format!("{}{}", coordinate.name, CALLER_SUFFIX),
            revision: CALLER_REVISION.to_string(),
        },
        dependency: coordinate.clone(),
        flags: DependencyFlags::default(),
        configuration: ConfigurationMapping::for_dependency(coordinate),
    })
}
