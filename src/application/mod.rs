// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between UI collaborators and the services
// - Translates domain values into DTOs and errors into alerts
// - Holds no state of its own beyond the AppState container

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
