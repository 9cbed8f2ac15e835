// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Provides the boundary between callers (CLI) and Services
// - Wires configuration into a ready-to-use state
// - Translates errors into caller-facing responses

pub mod commands;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
