//! services/app/src/adapters/tutor_llm.rs
//!
//! This module contains the adapter for the conversational AI tutor.
//! It implements the `TutorService` port from the `core` crate.

const SYSTEM_INSTRUCTIONS: &str = "You are Lumina, a friendly and highly knowledgeable AI academic tutor. Explain complex concepts simply, encourage students, and provide step-by-step guidance. Use Markdown for formatting equations or key terms.";

/// Conversational variability without excessive randomness.
const TEMPERATURE: f32 = 0.7;

/// Returned when the model replies successfully but with no usable text.
/// Callers must never receive empty text.
const EMPTY_RESPONSE_FALLBACK: &str = "I'm sorry, I couldn't generate a response.";

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use edusmart_core::{
    domain::{Role, TranscriptEntry},
    ports::{PortError, PortResult, TutorService},
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TutorService` against Gemini's
/// OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct GeminiTutorAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiTutorAdapter {
    /// Creates a new `GeminiTutorAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Replays the transcript in insertion order and appends the new user
    /// message as the final turn.
    fn build_messages(
        transcript: &[TranscriptEntry],
        new_message: &str,
    ) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(transcript.len() + 2);

        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()?
                .into(),
        );

        for entry in transcript {
            let message = match entry.role {
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(entry.text.as_str())
                    .build()?
                    .into(),
                Role::Model => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(entry.text.as_str())
                    .build()?
                    .into(),
            };
            messages.push(message);
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(new_message)
                .build()?
                .into(),
        );

        Ok(messages)
    }
}

//=========================================================================================
// `TutorService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TutorService for GeminiTutorAdapter {
    /// Sends the running conversation plus one new message and returns the
    /// tutor's reply verbatim.
    async fn tutor_reply(
        &self,
        transcript: &[TranscriptEntry],
        new_message: &str,
    ) -> PortResult<String> {
        let messages = Self::build_messages(transcript, new_message)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(TEMPERATURE)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which
        // respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // Extract the text content from the first choice in the response. A
        // successful call with no usable text degrades to the fixed apology.
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty());

        Ok(text.unwrap_or_else(|| EMPTY_RESPONSE_FALLBACK.to_string()))
    }
}
