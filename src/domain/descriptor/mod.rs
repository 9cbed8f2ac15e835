// src/domain/descriptor/mod.rs
//
// Descriptor Domain
//
// An ephemeral, in-memory declaration of exactly one dependency edge.
// Created per request and dropped when the request completes.
//
// CRITICAL RULES:
// - Pure value objects
// - No I/O, never written to disk

pub mod entity;

pub use entity::{
    synthesize, ConfigurationMapping, DependencyDescriptor, DependencyFlags, ModuleRevision,
    CALLER_REVISION, CALLER_SUFFIX,
};
