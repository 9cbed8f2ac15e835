// src/error/mod.rs
//
// Error module
//
// Provides:
// - AppError: every failure that reaches a caller
// - FetchError: per-endpoint failures, absorbed by the chain walk

pub mod types;

pub use types::{AppError, AppResult, FetchError};
