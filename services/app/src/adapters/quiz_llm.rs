//! services/app/src/adapters/quiz_llm.rs
//!
//! This module contains the adapter for structured quiz generation.
//! It implements the `QuizService` port from the `core` crate. The question
//! shape is enforced by a JSON schema attached to the request itself, and
//! re-checked when the response is parsed: a violation in any single
//! question fails the whole quiz, never a partial list.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use edusmart_core::{
    domain::QuizQuestion,
    ports::{PortError, PortResult, QuizService},
};
use serde::Deserialize;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `QuizService` against Gemini's
/// OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct GeminiQuizAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiQuizAdapter {
    /// Creates a new `GeminiQuizAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

/// The schema the response must conform to: an array of objects with a
/// required string `question`, string-array `options`, and integer
/// `correctAnswer`.
fn quiz_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "question": { "type": "string" },
                "options": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "correctAnswer": { "type": "integer" }
            },
            "required": ["question", "options", "correctAnswer"]
        }
    })
}

//=========================================================================================
// Response Parsing
//=========================================================================================

/// The wire shape of one generated question.
#[derive(Debug, Deserialize)]
struct RawQuizQuestion {
    question: String,
    options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    correct_answer: i64,
}

impl RawQuizQuestion {
    fn into_question(self) -> PortResult<QuizQuestion> {
        let count = self.options.len();
        let options: [String; 4] = self.options.try_into().map_err(|_| {
            PortError::MalformedResponse(format!("expected exactly 4 options, got {count}"))
        })?;

        let correct_answer = usize::try_from(self.correct_answer)
            .ok()
            .filter(|index| *index < 4)
            .ok_or_else(|| {
                PortError::MalformedResponse(format!(
                    "correct answer index {} out of range 0-3",
                    self.correct_answer
                ))
            })?;

        Ok(QuizQuestion {
            question: self.question,
            options,
            correct_answer,
        })
    }
}

/// Parses the model's JSON text into the typed question list.
///
/// Empty or missing text is an empty quiz, not an error; anything that fails
/// to parse or violates the question shape is an error.
fn parse_quiz_text(text: &str) -> PortResult<Vec<QuizQuestion>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let raw: Vec<RawQuizQuestion> = serde_json::from_str(trimmed)
        .map_err(|e| PortError::MalformedResponse(e.to_string()))?;

    raw.into_iter().map(RawQuizQuestion::into_question).collect()
}

//=========================================================================================
// `QuizService` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuizService for GeminiQuizAdapter {
    /// Requests a five-question multiple-choice quiz constrained by the
    /// declared schema and parses the result.
    async fn generate_quiz(&self, topic: &str) -> PortResult<Vec<QuizQuestion>> {
        let prompt = format!(
            "Generate a 5-question multiple choice quiz about: {topic}. Each question must \
             have exactly 4 options and one correct answer index (0-3)."
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into()])
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: "quiz".to_string(),
                    description: None,
                    schema: Some(quiz_schema()),
                    strict: None,
                },
            })
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        parse_quiz_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"[
        {
            "question": "Which principle guides a user's attention to key elements?",
            "options": ["Proximity", "Visual hierarchy", "Whitespace", "Symmetry"],
            "correctAnswer": 1
        },
        {
            "question": "What does a 3D button shadow provide?",
            "options": ["Contrast", "Alignment", "Affordance", "Balance"],
            "correctAnswer": 2
        }
    ]"#;

    #[test]
    fn well_formed_text_parses_into_typed_questions() {
        let quiz = parse_quiz_text(WELL_FORMED).unwrap();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz[0].options.len(), 4);
        assert_eq!(quiz[0].correct_answer, 1);
        assert_eq!(quiz[1].options[2], "Affordance");
    }

    #[test]
    fn empty_text_is_an_empty_quiz_not_an_error() {
        assert_eq!(parse_quiz_text("").unwrap(), Vec::new());
        assert_eq!(parse_quiz_text("   \n").unwrap(), Vec::new());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_quiz_text("not json at all").is_err());
        assert!(parse_quiz_text(r#"{"question": "an object, not an array"}"#).is_err());
    }

    #[test]
    fn a_question_with_three_options_fails_the_whole_quiz() {
        let text = r#"[
            {
                "question": "Fine question",
                "options": ["a", "b", "c", "d"],
                "correctAnswer": 0
            },
            {
                "question": "Short one",
                "options": ["a", "b", "c"],
                "correctAnswer": 0
            }
        ]"#;
        assert!(matches!(
            parse_quiz_text(text),
            Err(PortError::MalformedResponse(_))
        ));
    }

    #[test]
    fn an_out_of_range_answer_index_is_an_error() {
        let high = r#"[{"question": "q", "options": ["a","b","c","d"], "correctAnswer": 4}]"#;
        let negative = r#"[{"question": "q", "options": ["a","b","c","d"], "correctAnswer": -1}]"#;
        assert!(parse_quiz_text(high).is_err());
        assert!(parse_quiz_text(negative).is_err());
    }

    #[test]
    fn a_missing_required_field_is_an_error() {
        let text = r#"[{"question": "q", "options": ["a","b","c","d"]}]"#;
        assert!(parse_quiz_text(text).is_err());
    }
}
