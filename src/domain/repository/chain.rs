// src/domain/repository/chain.rs
//
// Repository Chain
//
// INVARIANTS:
// - At least one endpoint
// - Endpoint names are unique
// - Order is fallback precedence and is never changed after build

use std::collections::HashSet;

use super::entity::{EndpointSpec, RepositoryEndpoint};
use crate::domain::{DomainError, DomainResult};

/// Ordered, immutable chain of endpoints. Safe to share across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryChain {
    endpoints: Vec<RepositoryEndpoint>,
}

impl RepositoryChain {
    pub fn endpoints(&self) -> &[RepositoryEndpoint] {
        &self.endpoints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepositoryEndpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Endpoint names in precedence order
    pub fn names(&self) -> Vec<&str> {
        self.endpoints.iter().map(RepositoryEndpoint::name).collect()
    }

    #[cfg(test)]
    pub(crate) fn empty_for_tests() -> Self {
        Self { endpoints: Vec::new() }
    }

    /// Re-check the non-empty invariant at a boundary
    pub fn ensure_not_empty(&self) -> DomainResult<()> {
        if self.endpoints.is_empty() {
            return Err(DomainError::EmptyChain);
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RepositoryChain {
    type Item = &'a RepositoryEndpoint;
    type IntoIter = std::slice::Iter<'a, RepositoryEndpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}

/// Build a chain from endpoint specs, preserving their order.
///
/// Performs validation only; no network I/O.
pub fn build_chain(specs: &[EndpointSpec]) -> DomainResult<RepositoryChain> {
    if specs.is_empty() {
        return Err(DomainError::EmptyChain);
    }

    let mut seen = HashSet::with_capacity(specs.len());
    let mut endpoints = Vec::with_capacity(specs.len());

    for spec in specs {
        let endpoint = RepositoryEndpoint::from_spec(spec)?;
        if !seen.insert(endpoint.name().to_string()) {
            return Err(DomainError::DuplicateEndpoint(endpoint.name().to_string()));
        }
        endpoints.push(endpoint);
    }

    Ok(RepositoryChain { endpoints })
}
