// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Explicit SQL only

pub mod settings_repository;

pub use settings_repository::{keys, SettingsExt, SettingsRepository, SqliteSettingsRepository};
