// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod resolution_service;


pub use resolution_service::{ResolutionService, ResolveOptions};
