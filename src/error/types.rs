// src/error/types.rs
use crate::domain::{AdKind, DomainError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The ad network could not deliver a creative.
    #[error("Ad load failed ({kind}): {reason}")]
    AdLoad { kind: AdKind, reason: String },

    /// A loaded creative could not be shown (e.g. nothing to present on).
    #[error("Ad presentation failed ({kind}): {reason}")]
    AdPresent { kind: AdKind, reason: String },

    #[error("Entitlement fetch failed: {0}")]
    EntitlementFetch(String),

    #[error("Network not reachable")]
    NetworkUnreachable,

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Wraps a purchase-provider failure, keeping connectivity errors distinct.
    pub fn entitlement_fetch(err: AppError) -> Self {
        match err {
            AppError::NetworkUnreachable => AppError::NetworkUnreachable,
            AppError::EntitlementFetch(message) => AppError::EntitlementFetch(message),
            other => AppError::EntitlementFetch(other.to_string()),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
