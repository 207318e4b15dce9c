//! services/app/src/ai.rs
//!
//! The explicit AI capability value. Whether the generative-AI features are
//! available is decided once, at startup, from the configuration; call sites
//! cannot forget the disabled case because it is part of the type.
//!
//! Both operations degrade rather than fail: no error from the adapters ever
//! crosses this boundary. A conversational UI must always have something to
//! display, so every failure path has a fixed, finite return value.

use std::sync::Arc;

use async_openai::{config::OpenAIConfig, Client};
use edusmart_core::{
    domain::{QuizQuestion, TranscriptEntry},
    ports::{QuizService, TutorService},
};
use tracing::{info, warn};

use crate::adapters::{GeminiQuizAdapter, GeminiTutorAdapter};
use crate::config::Config;

/// Returned when no API key is configured. Distinct in wording from the
/// connection fallback so the two states are distinguishable.
pub const SETUP_FALLBACK: &str =
    "The AI tutor isn't set up yet, so I can't reply. Please add an API key and restart the app.";

/// Returned when a configured client hits any transport or provider failure.
pub const CONNECTION_FALLBACK: &str =
    "I'm having a bit of trouble connecting right now. Let's try that again in a moment!";

//=========================================================================================
// AiCapability
//=========================================================================================

/// The AI feature set, available or not. Built once per app lifetime.
pub enum AiCapability {
    Enabled {
        tutor: Arc<dyn TutorService>,
        quiz: Arc<dyn QuizService>,
    },
    Disabled,
}

impl AiCapability {
    /// Decides availability from the loaded configuration. With no key
    /// configured the capability is `Disabled` and no network I/O is ever
    /// attempted.
    pub fn from_config(config: &Config) -> Self {
        let Some(api_key) = config.gemini_api_key.as_deref() else {
            info!("no GEMINI_API_KEY configured; AI tutor and quiz generation are disabled");
            return Self::Disabled;
        };

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.api_base);
        let client = Client::with_config(openai_config);

        Self::Enabled {
            tutor: Arc::new(GeminiTutorAdapter::new(
                client.clone(),
                config.tutor_model.clone(),
            )),
            quiz: Arc::new(GeminiQuizAdapter::new(client, config.quiz_model.clone())),
        }
    }

    /// Builds an enabled capability from explicit service implementations.
    pub fn with_services(tutor: Arc<dyn TutorService>, quiz: Arc<dyn QuizService>) -> Self {
        Self::Enabled { tutor, quiz }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    // --- Operations ---------------------------------------------------------------------

    /// Gets a tutor reply for the transcript plus one new user message.
    ///
    /// Never returns empty text: a disabled capability yields the setup
    /// fallback, and any adapter failure yields the connection fallback. A
    /// single failed attempt yields the fallback immediately; there is no
    /// retry.
    pub async fn tutor_reply(&self, transcript: &[TranscriptEntry], new_message: &str) -> String {
        match self {
            Self::Disabled => SETUP_FALLBACK.to_string(),
            Self::Enabled { tutor, .. } => {
                match tutor.tutor_reply(transcript, new_message).await {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(error = %err, "tutor request failed");
                        CONNECTION_FALLBACK.to_string()
                    }
                }
            }
        }
    }

    /// Generates a quiz about the topic.
    ///
    /// Returns `None` when the capability is disabled or the request fails,
    /// and `Some` on success — where an empty list means the model produced
    /// no questions. The two outcomes are deliberately distinct signals.
    pub async fn generate_quiz(&self, topic: &str) -> Option<Vec<QuizQuestion>> {
        match self {
            Self::Disabled => None,
            Self::Enabled { quiz, .. } => match quiz.generate_quiz(topic).await {
                Ok(questions) => Some(questions),
                Err(err) => {
                    warn!(error = %err, "quiz generation failed");
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use edusmart_core::ports::{PortError, PortResult};

    /// A tutor/quiz backend with scripted outcomes.
    struct Scripted {
        tutor_outcome: Option<String>,
        quiz_outcome: Option<Vec<QuizQuestion>>,
    }

    #[async_trait]
    impl TutorService for Scripted {
        async fn tutor_reply(&self, _: &[TranscriptEntry], _: &str) -> PortResult<String> {
            self.tutor_outcome
                .clone()
                .ok_or_else(|| PortError::Unexpected("connection reset".to_string()))
        }
    }

    #[async_trait]
    impl QuizService for Scripted {
        async fn generate_quiz(&self, _: &str) -> PortResult<Vec<QuizQuestion>> {
            self.quiz_outcome
                .clone()
                .ok_or_else(|| PortError::Unexpected("connection reset".to_string()))
        }
    }

    fn capability(tutor: Option<String>, quiz: Option<Vec<QuizQuestion>>) -> AiCapability {
        let scripted = Arc::new(Scripted {
            tutor_outcome: tutor,
            quiz_outcome: quiz,
        });
        AiCapability::with_services(scripted.clone(), scripted)
    }

    #[tokio::test]
    async fn a_disabled_capability_uses_the_setup_fallback() {
        let ai = AiCapability::Disabled;
        assert!(!ai.is_enabled());
        assert_eq!(ai.tutor_reply(&[], "hello").await, SETUP_FALLBACK);
        assert_eq!(ai.generate_quiz("design").await, None);
    }

    #[tokio::test]
    async fn a_transport_failure_uses_the_connection_fallback() {
        let ai = capability(None, None);
        assert_eq!(ai.tutor_reply(&[], "hello").await, CONNECTION_FALLBACK);
    }

    #[test]
    fn the_two_fallback_strings_are_distinct() {
        assert_ne!(SETUP_FALLBACK, CONNECTION_FALLBACK);
    }

    #[tokio::test]
    async fn a_successful_reply_passes_through_verbatim() {
        let ai = capability(Some("Let's break that down step by step.".to_string()), None);
        assert_eq!(
            ai.tutor_reply(&[], "what is recursion?").await,
            "Let's break that down step by step."
        );
    }

    #[tokio::test]
    async fn quiz_failure_is_none_but_an_empty_quiz_is_some() {
        let failed = capability(None, None);
        assert_eq!(failed.generate_quiz("topic").await, None);

        let empty = capability(None, Some(Vec::new()));
        let result = empty.generate_quiz("topic").await;
        assert_eq!(result, Some(Vec::new()));
        assert!(result.is_some_and(|quiz| quiz.is_empty()));
    }
}
