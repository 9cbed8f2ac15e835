// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the CLI and Services
// - Commands accept caller-shaped input, return domain reports
// - Commands NEVER contain resolution logic

pub mod resolve_commands;

pub use resolve_commands::*;
