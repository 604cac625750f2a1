//! Error types for the SEO report service.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for pipeline stages
//! - `Result<T>`: Type alias for Results using AppError
//!
//! Display strings are client-facing: route handlers embed them verbatim
//! into `{"error": ...}` response bodies, so variants carry the final
//! message rather than a prefixed technical description.

use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for the report pipeline.
#[derive(Debug, Error)]
pub enum AppError {
    /// Target site could not be fetched (network, TLS, non-2xx status)
    #[error("{0}")]
    Fetch(String),

    /// Report generation failed (missing credential or OpenAI call error)
    #[error("{0}")]
    Generation(String),

    /// Persistence backend rejected an operation
    #[error("{0}")]
    Store(String),

    /// Malformed identifier supplied by the caller
    #[error("{0}")]
    Validation(String),

    /// Lookup miss
    #[error("{0}")]
    NotFound(String),

    /// Email delivery failed (missing credential or provider error)
    #[error("{0}")]
    Notify(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a generation error
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a notify error
    pub fn notify(msg: impl Into<String>) -> Self {
        Self::Notify(msg.into())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
