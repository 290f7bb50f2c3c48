// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-facing alerts
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Alert shown for any failure that has no dedicated message
const GENERIC_TITLE: &str = "Error";
const GENERIC_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    /// Alert title
    pub title: String,
    /// Alert body
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    NotFound,

    Validation,

    /// No connectivity; the UI shows the offline alert
    Network,

    /// Purchase provider failed (entitlement fetch, purchase, restore)
    Purchase,

    /// Ad network failed to load or show
    Ads,

    Database,

    Internal,
}

impl ErrorResponse {
    fn generic(error_type: ErrorType, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            title: GENERIC_TITLE.to_string(),
            message: GENERIC_MESSAGE.to_string(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NetworkUnreachable => Self {
                success: false,
                error_type: ErrorType::Network,
                title: "Network Not Reachable".to_string(),
                message: "The Internet connection appears to be offline.".to_string(),
                details: None,
            },

            AppError::NotFound => Self {
                success: false,
                error_type: ErrorType::NotFound,
                title: GENERIC_TITLE.to_string(),
                message: "Resource not found".to_string(),
                details: None,
            },

            AppError::EntitlementFetch(reason) => {
                log::warn!("Purchase provider error: {}", reason);
                Self::generic(ErrorType::Purchase, Some(reason))
            }

            error @ (AppError::AdLoad { .. } | AppError::AdPresent { .. }) => {
                log::warn!("{}", error);
                Self::generic(ErrorType::Ads, Some(error.to_string()))
            }

            AppError::Domain(domain_error) => {
                Self::generic(ErrorType::Validation, Some(domain_error.to_string()))
            }

            error @ (AppError::Database(_) | AppError::Pool(_)) => {
                log::error!("Persistence error: {:?}", error);
                Self::generic(ErrorType::Database, Some("Check logs for details".to_string()))
            }

            other => {
                log::error!("Unexpected error: {:?}", other);
                Self::generic(ErrorType::Internal, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            title: GENERIC_TITLE.to_string(),
            message,
            details: None,
        }
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response).unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}
