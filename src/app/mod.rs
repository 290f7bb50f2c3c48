// src/app/mod.rs
//
// Process-level wiring: builds every service once and hands them out
// through AppState.

pub mod bootstrap;

pub use bootstrap::{bootstrap, build_app_state, run_launch_sequence, Collaborators};
