//! services/app/src/error.rs
//!
//! Defines the primary error type for the `app` service.

use crate::config::ConfigError;
use edusmart_core::ports::PortError;

/// The primary error type for the `app` service.
///
/// AI-client failures never surface through this type; the capability layer
/// degrades them to fallback values. What remains is startup and I/O.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a standard Input/Output error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
