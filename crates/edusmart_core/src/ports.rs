//! crates/edusmart_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the specific generative-AI backend.

use async_trait::async_trait;

use crate::domain::{QuizQuestion, TranscriptEntry};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The backing service has no credential configured.
    #[error("Service not configured: {0}")]
    NotConfigured(&'static str),
    /// The service replied, but the payload did not match the declared shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TutorService: Send + Sync {
    /// Sends the full transcript plus one new user message and returns the
    /// tutor's reply. Implementations must never return empty text: a
    /// response with no usable text yields a fixed apology string instead.
    async fn tutor_reply(
        &self,
        transcript: &[TranscriptEntry],
        new_message: &str,
    ) -> PortResult<String>;
}

#[async_trait]
pub trait QuizService: Send + Sync {
    /// Generates a multiple-choice quiz about the given topic. An empty
    /// response body is an empty quiz; a response that violates the declared
    /// question shape is an error, never a partial list.
    async fn generate_quiz(&self, topic: &str) -> PortResult<Vec<QuizQuestion>>;
}
