// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands return DTOs or plain values
// - Commands convert errors to serialized ErrorResponse strings
// - Commands NEVER contain business logic

pub mod ad_commands;
pub mod entitlement_commands;
pub mod launch_commands;

pub use ad_commands::*;
pub use entitlement_commands::*;
pub use launch_commands::*;
